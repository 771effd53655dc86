//! Menu items and submenu contributions.
//!
//! # Invariants
//! - A menu item either runs a command or opens a submenu, never both.
//! - `group` may end with `@<order>`; items without an order sort last.

use crate::contributions::commands::Icon;
use crate::contributions::validation::{require_command_id, require_non_empty, ContributionResult};
use serde::{Deserialize, Serialize};

/// Menu entry that runs a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuCommand {
    pub command: String,
    /// Command run instead when the alt modifier is held.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Context expression controlling visibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Menu entry that opens a contributed submenu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmenuItem {
    /// Identifier of a `SubmenuContribution`.
    pub submenu: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// One entry in a menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuItem {
    Command(MenuCommand),
    Submenu(SubmenuItem),
}

impl MenuItem {
    pub fn when(&self) -> Option<&str> {
        match self {
            Self::Command(item) => item.when.as_deref(),
            Self::Submenu(item) => item.when.as_deref(),
        }
    }

    pub fn group(&self) -> Option<&str> {
        match self {
            Self::Command(item) => item.group.as_deref(),
            Self::Submenu(item) => item.group.as_deref(),
        }
    }

    /// Splits `group` into its name and optional `@<order>` suffix.
    ///
    /// `"navigation@2"` -> `("navigation", Some(2))`. A suffix that is not a
    /// number is kept as part of the name.
    pub fn group_order(&self) -> (Option<&str>, Option<u32>) {
        let Some(group) = self.group() else {
            return (None, None);
        };
        match group.rsplit_once('@') {
            Some((name, order)) => match order.trim().parse::<u32>() {
                Ok(order) => (Some(name), Some(order)),
                Err(_) => (Some(group), None),
            },
            None => (Some(group), None),
        }
    }

    pub(crate) fn validate(&self, path: &str) -> ContributionResult<()> {
        match self {
            Self::Command(item) => {
                require_command_id(&format!("{path}.command"), &item.command)?;
                if let Some(alt) = &item.alt {
                    require_command_id(&format!("{path}.alt"), alt)?;
                }
                Ok(())
            }
            Self::Submenu(item) => require_non_empty(&format!("{path}.submenu"), &item.submenu),
        }
    }
}

/// Contribute a submenu that menu items can open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmenuContribution {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

impl SubmenuContribution {
    pub(crate) fn validate(&self, path: &str) -> ContributionResult<()> {
        require_non_empty(&format!("{path}.id"), &self.id)?;
        require_non_empty(&format!("{path}.label"), &self.label)
    }
}
