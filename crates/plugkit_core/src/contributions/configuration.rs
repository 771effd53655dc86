//! Configuration contributions.
//!
//! A configuration section is a titled group of settings, each described by
//! a small JSON-schema subset. The settings editor renders one page per
//! section.

use crate::contributions::validation::{require_non_empty, ContributionError, ContributionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// JSON value kinds a setting may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

impl PropertyType {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => {
                value.is_i64()
                    || value.is_u64()
                    || value.as_f64().is_some_and(|number| number.fract() == 0.0)
            }
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
            Self::Null => value.is_null(),
        }
    }
}

/// One type, or a list of acceptable types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyTypes {
    One(PropertyType),
    Many(Vec<PropertyType>),
}

impl PropertyTypes {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::One(kind) => kind.matches(value),
            Self::Many(kinds) => kinds.iter().any(|kind| kind.matches(value)),
        }
    }
}

/// Schema of one setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigurationProperty {
    #[serde(rename = "type")]
    pub kind: PropertyTypes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown_description: Option<String>,
    /// Allowed values.
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_descriptions: Option<Vec<String>>,
    /// Shown when the setting is used; marks the setting deprecated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
}

impl ConfigurationProperty {
    pub fn is_deprecated(&self) -> bool {
        self.deprecation_message.is_some()
    }
}

/// Contribute a section of settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigurationContribution {
    /// Section heading, also used as the submenu entry name when a plugin
    /// contributes several sections.
    pub title: String,
    #[serde(default)]
    pub properties: BTreeMap<String, ConfigurationProperty>,
}

impl ConfigurationContribution {
    pub(crate) fn validate(&self, path: &str) -> ContributionResult<()> {
        require_non_empty(&format!("{path}.title"), &self.title)?;
        for (name, property) in &self.properties {
            let field = format!("{path}.properties.{name}");
            if let Some(default) = &property.default {
                if !property.kind.matches(default) {
                    return Err(ContributionError::invalid_field(
                        format!("{field}.default"),
                        default.to_string(),
                        "default does not match declared type",
                    ));
                }
            }
        }
        Ok(())
    }
}
