//! Theme contributions.

use crate::contributions::validation::{
    is_valid_color, require_non_empty, ContributionError, ContributionResult,
};
use serde::{Deserialize, Serialize};

/// Base appearance a theme extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeType {
    Dark,
    Light,
}

/// Color overrides; unset entries inherit from the base theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeColors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
}

impl ThemeColors {
    /// Set colors as `(name, value)` pairs in declaration order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("canvas", &self.canvas),
            ("console", &self.console),
            ("background", &self.background),
            ("foreground", &self.foreground),
            ("primary", &self.primary),
            ("secondary", &self.secondary),
            ("highlight", &self.highlight),
            ("text", &self.text),
            ("icon", &self.icon),
            ("warning", &self.warning),
            ("current", &self.current),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|value| (name, value)))
        .collect()
    }
}

/// Contribute a color theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeContribution {
    /// Identifier used in user settings.
    pub id: String,
    /// Label shown in the UI.
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ThemeType,
    /// Name of a syntax highlighting style for the console.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax_style: Option<String>,
    pub colors: ThemeColors,
}

impl ThemeContribution {
    pub(crate) fn validate(&self, path: &str) -> ContributionResult<()> {
        require_non_empty(&format!("{path}.id"), &self.id)?;
        require_non_empty(&format!("{path}.label"), &self.label)?;
        for (name, value) in self.colors.entries() {
            if !is_valid_color(value) {
                return Err(ContributionError::invalid_field(
                    format!("{path}.colors.{name}"),
                    value,
                    "expected `#rrggbb` or `rgb(r, g, b)`",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ThemeContribution, ThemeType};
    use serde_json::json;

    fn theme_json(background: &str) -> serde_json::Value {
        json!({
            "id": "monokai",
            "label": "Monokai",
            "type": "dark",
            "syntax_style": "monokai",
            "colors": {
                "background": background,
                "foreground": "rgb(65, 72, 81)",
            },
        })
    }

    #[test]
    fn deserializes_theme_type_under_type_key() {
        let theme: ThemeContribution =
            serde_json::from_value(theme_json("#272822")).expect("theme should deserialize");
        assert_eq!(theme.kind, ThemeType::Dark);
        assert_eq!(
            theme.colors.entries(),
            vec![("background", "#272822"), ("foreground", "rgb(65, 72, 81)")]
        );
        theme.validate("themes[0]").expect("theme is valid");
    }

    #[test]
    fn validate_rejects_bad_color() {
        let theme: ThemeContribution =
            serde_json::from_value(theme_json("dark-grey")).expect("shape is valid");
        let err = theme.validate("themes[0]").unwrap_err();
        assert!(err.to_string().contains("themes[0].colors.background"));
    }

    #[test]
    fn rejects_unknown_color_key() {
        let result = serde_json::from_value::<ThemeContribution>(json!({
            "id": "monokai",
            "label": "Monokai",
            "type": "dark",
            "colors": {"backgroud": "#000"},
        }));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_theme_type() {
        let mut value = theme_json("#000");
        value["type"] = json!("sepia");
        assert!(serde_json::from_value::<ThemeContribution>(value).is_err());
    }
}
