//! Sample data contributions.

use crate::contributions::validation::{
    require_command_id, require_non_empty, ContributionError, ContributionResult,
};
use crate::executable::Executable;
use serde::{Deserialize, Serialize};

/// Sample data produced by calling a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleDataGenerator {
    pub command: String,
    /// Unique key within this plugin's samples.
    pub key: String,
    pub display_name: String,
}

/// Sample data opened from a URI with a reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleDataUri {
    pub key: String,
    pub display_name: String,
    /// Path or URL of the data.
    pub uri: String,
    /// Plugin whose reader should open `uri`; any capable reader when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reader_plugin: Option<String>,
}

/// Contribute sample data for use in the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SampleDataContribution {
    Generator(SampleDataGenerator),
    Uri(SampleDataUri),
}

impl SampleDataContribution {
    pub fn key(&self) -> &str {
        match self {
            Self::Generator(sample) => &sample.key,
            Self::Uri(sample) => &sample.key,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Generator(sample) => &sample.display_name,
            Self::Uri(sample) => &sample.display_name,
        }
    }

    /// Returns the generator when this sample is command-backed.
    pub fn as_generator(&self) -> Option<&SampleDataGenerator> {
        match self {
            Self::Generator(sample) => Some(sample),
            Self::Uri(_) => None,
        }
    }

    pub(crate) fn validate(&self, path: &str) -> ContributionResult<()> {
        require_non_empty(&format!("{path}.key"), self.key())?;
        require_non_empty(&format!("{path}.display_name"), self.display_name())?;
        match self {
            Self::Generator(sample) => {
                require_command_id(&format!("{path}.command"), &sample.command)
            }
            Self::Uri(sample) => {
                require_non_empty(&format!("{path}.uri"), &sample.uri)?;
                if let Some(plugin) = &sample.reader_plugin {
                    if plugin.trim().is_empty() {
                        return Err(ContributionError::invalid_field(
                            format!("{path}.reader_plugin"),
                            plugin.as_str(),
                            "must not be blank when set",
                        ));
                    }
                }
                Ok(())
            }
        }
    }
}

impl Executable for SampleDataGenerator {
    fn command(&self) -> &str {
        &self.command
    }
}

#[cfg(test)]
mod tests {
    use super::SampleDataContribution;
    use serde_json::json;

    #[test]
    fn distinguishes_generator_from_uri() {
        let generator: SampleDataContribution = serde_json::from_value(json!({
            "command": "my-plugin.make_blobs",
            "key": "blobs",
            "display_name": "Blobs",
        }))
        .expect("generator should deserialize");
        assert!(generator.as_generator().is_some());
        assert_eq!(generator.key(), "blobs");

        let uri: SampleDataContribution = serde_json::from_value(json!({
            "key": "cells",
            "display_name": "Cells",
            "uri": "https://example.org/cells.tif",
            "reader_plugin": "builtins",
        }))
        .expect("uri sample should deserialize");
        assert!(uri.as_generator().is_none());
        assert_eq!(uri.display_name(), "Cells");
    }

    #[test]
    fn rejects_mixed_variant_fields() {
        let result = serde_json::from_value::<SampleDataContribution>(json!({
            "command": "my-plugin.make_blobs",
            "key": "blobs",
            "display_name": "Blobs",
            "uri": "file.tif",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_blank_uri() {
        let sample: SampleDataContribution = serde_json::from_value(json!({
            "key": "cells",
            "display_name": "Cells",
            "uri": "  ",
        }))
        .expect("shape is valid");
        assert!(sample.validate("sample_data[0]").is_err());
    }
}
