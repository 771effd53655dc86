//! Field-format checks shared by contribution records.
//!
//! # Responsibility
//! - Hold the identifier patterns manifest fields must satisfy.
//! - Define the error reported for schema and field violations.
//!
//! # Invariants
//! - Checks are single-field only; no check looks at a sibling field.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static COMMAND_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z_][a-z0-9_-]*\.[a-zA-Z0-9_.-]+$").expect("command id pattern")
});

static PYTHON_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z_][a-zA-Z0-9_]*\.)*[a-zA-Z_][a-zA-Z0-9_]*:[a-zA-Z_][a-zA-Z0-9_]*$")
        .expect("python name pattern")
});

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").expect("hex color pattern")
});

static RGB_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
        .expect("rgb color pattern")
});

pub type ContributionResult<T> = Result<T, ContributionError>;

/// Manifest contribution errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContributionError {
    /// Document shape does not match the schema (unknown key, wrong type,
    /// missing required field).
    Schema(String),
    /// A field has the right type but an unacceptable value.
    InvalidField {
        field: String,
        value: String,
        reason: &'static str,
    },
    /// The manifest document could not be read.
    Io { path: String, message: String },
}

impl ContributionError {
    pub(crate) fn invalid_field(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: &'static str,
    ) -> Self {
        Self::InvalidField {
            field: field.into(),
            value: value.into(),
            reason,
        }
    }
}

impl Display for ContributionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Schema(message) => write!(f, "contribution schema violation: {message}"),
            Self::InvalidField {
                field,
                value,
                reason,
            } => write!(f, "contribution field `{field}` is invalid ({reason}): {value}"),
            Self::Io { path, message } => {
                write!(f, "failed to read contributions from `{path}`: {message}")
            }
        }
    }
}

impl Error for ContributionError {}

impl From<serde_json::Error> for ContributionError {
    fn from(value: serde_json::Error) -> Self {
        Self::Schema(value.to_string())
    }
}

/// Returns whether `value` looks like `<plugin_name>.<command>`.
pub fn is_valid_command_id(value: &str) -> bool {
    COMMAND_ID_RE.is_match(value)
}

/// Returns whether `value` is a fully qualified `module.path:attr` name.
pub fn is_valid_python_name(value: &str) -> bool {
    PYTHON_NAME_RE.is_match(value)
}

/// Returns whether `value` is a `#rgb`, `#rrggbb`, `#rrggbbaa` or
/// `rgb(r, g, b)` color.
pub fn is_valid_color(value: &str) -> bool {
    let value = value.trim();
    if HEX_COLOR_RE.is_match(value) {
        return true;
    }
    let Some(captures) = RGB_COLOR_RE.captures(value) else {
        return false;
    };
    captures
        .iter()
        .skip(1)
        .flatten()
        .all(|channel| channel.as_str().parse::<u16>().is_ok_and(|v| v <= 255))
}

pub(crate) fn require_command_id(field: &str, value: &str) -> ContributionResult<()> {
    if value.trim().is_empty() {
        return Err(ContributionError::invalid_field(
            field,
            value,
            "must not be empty",
        ));
    }
    if !is_valid_command_id(value) {
        return Err(ContributionError::invalid_field(
            field,
            value,
            "expected `<plugin_name>.<command>`",
        ));
    }
    Ok(())
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> ContributionResult<()> {
    if value.trim().is_empty() {
        return Err(ContributionError::invalid_field(
            field,
            value,
            "must not be empty",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{is_valid_color, is_valid_command_id, is_valid_python_name, ContributionError};

    #[test]
    fn accepts_plugin_scoped_command_ids() {
        assert!(is_valid_command_id("my-plugin.open_widget"));
        assert!(is_valid_command_id("my_plugin.readers.tiff"));
        assert!(!is_valid_command_id("open_widget"));
        assert!(!is_valid_command_id("My-Plugin.open"));
        assert!(!is_valid_command_id("my-plugin."));
    }

    #[test]
    fn accepts_qualified_python_names() {
        assert!(is_valid_python_name("my_plugin._widgets:make_widget"));
        assert!(is_valid_python_name("pkg:func"));
        assert!(!is_valid_python_name("my_plugin.make_widget"));
        assert!(!is_valid_python_name("my-plugin:func"));
    }

    #[test]
    fn accepts_hex_and_rgb_colors() {
        assert!(is_valid_color("#fff"));
        assert!(is_valid_color("#262930"));
        assert!(is_valid_color("#26293080"));
        assert!(is_valid_color("rgb(38, 41, 48)"));
        assert!(!is_valid_color("rgb(300, 0, 0)"));
        assert!(!is_valid_color("#12345"));
        assert!(!is_valid_color("teal"));
    }

    #[test]
    fn invalid_field_message_names_field_and_reason() {
        let err = ContributionError::invalid_field("commands[0].id", "bad", "expected id");
        let message = err.to_string();
        assert!(message.contains("commands[0].id"));
        assert!(message.contains("expected id"));
    }
}
