//! Command contributions.

use crate::contributions::validation::{
    is_valid_python_name, require_command_id, require_non_empty, ContributionError,
    ContributionResult,
};
use serde::{Deserialize, Serialize};

/// Icon reference: one path/URL, or a light/dark pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Icon {
    Single(String),
    Themed(ThemedIcon),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemedIcon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<String>,
}

impl Icon {
    /// Returns the icon for the requested theme, falling back to the other.
    pub fn for_theme(&self, dark: bool) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value.as_str()),
            Self::Themed(icon) => {
                let (preferred, fallback) = if dark {
                    (&icon.dark, &icon.light)
                } else {
                    (&icon.light, &icon.dark)
                };
                preferred.as_deref().or(fallback.as_deref())
            }
        }
    }
}

/// A named command the plugin registers with the host.
///
/// Other contributions (readers, writers, widgets, menu items, keybindings)
/// refer to commands by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandContribution {
    /// `<plugin_name>.<command>`, unique across the host.
    pub id: String,
    /// Title shown in menus and the command palette.
    pub title: String,
    /// Fully qualified `module.path:attr` of the implementation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    /// Context expression that must hold for the command to be enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enablement: Option<String>,
}

impl CommandContribution {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            python_name: None,
            short_title: None,
            category: None,
            icon: None,
            enablement: None,
        }
    }

    pub(crate) fn validate(&self, path: &str) -> ContributionResult<()> {
        require_command_id(&format!("{path}.id"), &self.id)?;
        require_non_empty(&format!("{path}.title"), &self.title)?;
        if let Some(python_name) = &self.python_name {
            if !is_valid_python_name(python_name) {
                return Err(ContributionError::invalid_field(
                    format!("{path}.python_name"),
                    python_name.as_str(),
                    "expected `module.path:attr`",
                ));
            }
        }
        Ok(())
    }
}
