//! Keybinding contributions.

use crate::contributions::validation::{require_command_id, require_non_empty, ContributionResult};
use serde::{Deserialize, Serialize};

/// Host platform used to pick a key override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Mac,
    Linux,
    Windows,
}

impl Platform {
    /// Platform of the running process; unknown targets map to `Linux`.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => Self::Mac,
            "windows" => Self::Windows,
            _ => Self::Linux,
        }
    }
}

/// Bind a key sequence to a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyBindingContribution {
    pub command: String,
    /// Default key sequence, e.g. `Ctrl+Shift+O`.
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linux: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win: Option<String>,
    /// Context expression that must hold for the binding to be active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
}

impl KeyBindingContribution {
    /// Key sequence for `platform`, falling back to `key`.
    pub fn key_for(&self, platform: Platform) -> &str {
        let key_override = match platform {
            Platform::Mac => &self.mac,
            Platform::Linux => &self.linux,
            Platform::Windows => &self.win,
        };
        key_override.as_deref().unwrap_or(&self.key)
    }

    /// Key sequence for the platform this process runs on.
    pub fn current_key(&self) -> &str {
        self.key_for(Platform::current())
    }

    pub(crate) fn validate(&self, path: &str) -> ContributionResult<()> {
        require_command_id(&format!("{path}.command"), &self.command)?;
        require_non_empty(&format!("{path}.key"), &self.key)
    }
}
