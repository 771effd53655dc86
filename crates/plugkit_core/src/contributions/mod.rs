//! Contribution points a plugin manifest can declare.
//!
//! # Responsibility
//! - Define the strict record types for every contribution kind.
//! - Aggregate them into `ContributionPoints` and load that from JSON.
//!
//! # Invariants
//! - Unknown keys are rejected at every level, never ignored.
//! - `configuration` is always a list after load, even when the document
//!   declares a single section or none at all.
//! - Records are immutable once loaded.

pub mod commands;
pub mod configuration;
pub mod keybindings;
pub mod menus;
pub mod readers;
pub mod sample_data;
pub mod themes;
pub mod validation;
pub mod widgets;
pub mod writers;

use crate::contributions::commands::CommandContribution;
use crate::contributions::configuration::ConfigurationContribution;
use crate::contributions::keybindings::KeyBindingContribution;
use crate::contributions::menus::{MenuItem, SubmenuContribution};
use crate::contributions::readers::ReaderContribution;
use crate::contributions::sample_data::SampleDataContribution;
use crate::contributions::themes::ThemeContribution;
use crate::contributions::validation::{ContributionError, ContributionResult};
use crate::contributions::widgets::WidgetContribution;
use crate::contributions::writers::WriterContribution;
use log::{debug, info, warn};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Everything one plugin contributes to the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContributionPoints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<CommandContribution>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readers: Option<Vec<ReaderContribution>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writers: Option<Vec<WriterContribution>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widgets: Option<Vec<WidgetContribution>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_data: Option<Vec<SampleDataContribution>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themes: Option<Vec<ThemeContribution>>,
    /// Items added to existing host menus, keyed by menu id. Items can run a
    /// command or open a submenu, so plugins can nest their own hierarchy
    /// inside the host menu structure.
    #[serde(default)]
    pub menus: BTreeMap<String, Vec<MenuItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submenus: Option<Vec<SubmenuContribution>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keybindings: Option<Vec<KeyBindingContribution>>,
    /// Settings sections. The document may hold one section object or an
    /// array of them; several sections get a submenu in the settings editor.
    #[serde(default, deserialize_with = "one_or_many")]
    pub configuration: Vec<ConfigurationContribution>,
}

/// Wraps a lone value in a one-element list; arrays pass through unchanged.
pub fn normalize_configuration(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
    })
}

impl ContributionPoints {
    /// Parses and validates contributions from a JSON document.
    pub fn from_json_str(raw: &str) -> ContributionResult<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_json_value(value)
    }

    /// Builds contributions from an already parsed JSON value.
    ///
    /// A `configuration` entry is normalized to a list before the record
    /// shape is checked.
    pub fn from_json_value(mut value: Value) -> ContributionResult<Self> {
        if let Some(object) = value.as_object_mut() {
            if let Some(section) = object.remove("configuration") {
                object.insert(
                    "configuration".to_string(),
                    Value::Array(normalize_configuration(section)),
                );
            }
        }

        let points: Self = serde_json::from_value(value).map_err(|err| {
            warn!("event=contributions_load module=contributions status=error reason=schema error={err}");
            ContributionError::from(err)
        })?;
        points.validate().map_err(|err| {
            warn!("event=contributions_load module=contributions status=error reason=field error={err}");
            err
        })?;

        debug!(
            "event=contributions_load module=contributions status=ok commands={} widgets={} menus={} configuration={}",
            points.commands().len(),
            points.widgets().len(),
            points.menus.len(),
            points.configuration.len()
        );
        Ok(points)
    }

    /// Reads, parses and validates a contributions JSON file.
    pub fn from_path(path: &Path) -> ContributionResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| ContributionError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let points = Self::from_json_str(&raw)?;
        info!(
            "event=contributions_read module=contributions status=ok path={}",
            path.display()
        );
        Ok(points)
    }

    /// Runs single-field format checks over every record.
    pub fn validate(&self) -> ContributionResult<()> {
        for (i, item) in self.commands().iter().enumerate() {
            item.validate(&format!("commands[{i}]"))?;
        }
        for (i, item) in self.readers().iter().enumerate() {
            item.validate(&format!("readers[{i}]"))?;
        }
        for (i, item) in self.writers().iter().enumerate() {
            item.validate(&format!("writers[{i}]"))?;
        }
        for (i, item) in self.widgets().iter().enumerate() {
            item.validate(&format!("widgets[{i}]"))?;
        }
        for (i, item) in self.sample_data().iter().enumerate() {
            item.validate(&format!("sample_data[{i}]"))?;
        }
        for (i, item) in self.themes().iter().enumerate() {
            item.validate(&format!("themes[{i}]"))?;
        }
        for (menu_id, items) in &self.menus {
            for (i, item) in items.iter().enumerate() {
                item.validate(&format!("menus.{menu_id}[{i}]"))?;
            }
        }
        for (i, item) in self.submenus().iter().enumerate() {
            item.validate(&format!("submenus[{i}]"))?;
        }
        for (i, item) in self.keybindings().iter().enumerate() {
            item.validate(&format!("keybindings[{i}]"))?;
        }
        for (i, item) in self.configuration.iter().enumerate() {
            item.validate(&format!("configuration[{i}]"))?;
        }
        Ok(())
    }

    pub fn to_json_value(&self) -> ContributionResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn commands(&self) -> &[CommandContribution] {
        self.commands.as_deref().unwrap_or_default()
    }

    pub fn readers(&self) -> &[ReaderContribution] {
        self.readers.as_deref().unwrap_or_default()
    }

    pub fn writers(&self) -> &[WriterContribution] {
        self.writers.as_deref().unwrap_or_default()
    }

    pub fn widgets(&self) -> &[WidgetContribution] {
        self.widgets.as_deref().unwrap_or_default()
    }

    pub fn sample_data(&self) -> &[SampleDataContribution] {
        self.sample_data.as_deref().unwrap_or_default()
    }

    pub fn themes(&self) -> &[ThemeContribution] {
        self.themes.as_deref().unwrap_or_default()
    }

    pub fn submenus(&self) -> &[SubmenuContribution] {
        self.submenus.as_deref().unwrap_or_default()
    }

    pub fn keybindings(&self) -> &[KeyBindingContribution] {
        self.keybindings.as_deref().unwrap_or_default()
    }

    pub fn get_command(&self, command_id: &str) -> Option<&CommandContribution> {
        self.commands().iter().find(|command| command.id == command_id)
    }

    /// Items contributed to one host menu, in declaration order.
    pub fn menu_items(&self, menu_id: &str) -> &[MenuItem] {
        self.menus.get(menu_id).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_configuration, ContributionPoints};
    use serde_json::json;

    #[test]
    fn normalize_wraps_single_value() {
        let section = json!({"title": "Settings", "properties": {}});
        assert_eq!(normalize_configuration(section.clone()), vec![section]);
    }

    #[test]
    fn normalize_keeps_lists() {
        let list = vec![json!({"title": "A"}), json!({"title": "B"})];
        assert_eq!(normalize_configuration(json!(list.clone())), list);
        assert!(normalize_configuration(json!([])).is_empty());
    }

    #[test]
    fn serde_path_accepts_single_configuration_object() {
        let points: ContributionPoints = serde_json::from_value(json!({
            "configuration": {"title": "Only section"},
        }))
        .expect("single section should deserialize");
        assert_eq!(points.configuration.len(), 1);
        assert_eq!(points.configuration[0].title, "Only section");
    }

    #[test]
    fn empty_document_has_no_contributions() {
        let points = ContributionPoints::from_json_str("{}").expect("empty document is valid");
        assert_eq!(points, ContributionPoints::default());
        assert!(points.commands.is_none());
        assert!(points.commands().is_empty());
        assert!(points.menus.is_empty());
        assert!(points.configuration.is_empty());
    }

    #[test]
    fn menu_items_defaults_to_empty_slice() {
        let points = ContributionPoints::default();
        assert!(points.menu_items("viewer/file").is_empty());
    }
}
