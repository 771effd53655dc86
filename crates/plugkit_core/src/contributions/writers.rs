//! Writer contributions and layer type constraints.
//!
//! # Responsibility
//! - Describe which layer combinations a writer command can save.
//! - Parse `layer_types` entries such as `image`, `labels?`, `points+`,
//!   `shapes*`, `image{2,4}`.
//!
//! # Invariants
//! - A bare layer name means exactly one layer of that type.
//! - Layer types not listed by a writer must be absent from the selection.

use crate::contributions::validation::{
    require_command_id, ContributionError, ContributionResult,
};
use crate::executable::Executable;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static LAYER_CONSTRAINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z]+)(\?|\+|\*|\{(\d+)(,(\d*))?\})?$").expect("layer constraint pattern")
});

/// Layer kinds the host can hand to a writer.
pub const LAYER_TYPES: &[&str] = &[
    "image", "labels", "points", "shapes", "surface", "tracks", "vectors",
];

/// Contribute a layer writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WriterContribution {
    pub command: String,
    /// Layer type constraints, one entry per accepted layer kind.
    pub layer_types: Vec<String>,
    /// Extensions this writer produces, e.g. `.tif`. Empty means any.
    #[serde(default)]
    pub filename_extensions: Vec<String>,
    /// Short description shown in save dialogs.
    #[serde(default)]
    pub display_name: String,
}

/// Parsed form of one `layer_types` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerTypeConstraint {
    pub layer_type: &'static str,
    pub min: usize,
    /// `None` is unbounded.
    pub max: Option<usize>,
}

impl LayerTypeConstraint {
    pub fn parse(value: &str) -> Option<Self> {
        let captures = LAYER_CONSTRAINT_RE.captures(value.trim())?;
        let name = captures.get(1)?.as_str();
        let layer_type = *LAYER_TYPES.iter().find(|known| **known == name)?;

        let (min, max) = match captures.get(2).map(|m| m.as_str()) {
            None => (1, Some(1)),
            Some("?") => (0, Some(1)),
            Some("+") => (1, None),
            Some("*") => (0, None),
            Some(_) => {
                let min = captures.get(3)?.as_str().parse::<usize>().ok()?;
                match (captures.get(4), captures.get(5).map(|m| m.as_str())) {
                    (None, _) => (min, Some(min)),
                    (Some(_), None) | (Some(_), Some("")) => (min, None),
                    (Some(_), Some(raw)) => (min, Some(raw.parse::<usize>().ok()?)),
                }
            }
        };
        if max.is_some_and(|max| max < min) {
            return None;
        }

        Some(Self {
            layer_type,
            min,
            max,
        })
    }

    pub fn allows(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

impl WriterContribution {
    /// Parsed constraints; invalid entries are skipped (see `validate`).
    pub fn layer_constraints(&self) -> Vec<LayerTypeConstraint> {
        self.layer_types
            .iter()
            .filter_map(|value| LayerTypeConstraint::parse(value))
            .collect()
    }

    /// Lowercased extensions with one leading `*` stripped, so `*.TIF`
    /// becomes `.tif`. Malformed entries are skipped (see `validate`).
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.filename_extensions
            .iter()
            .filter_map(|ext| normalize_extension(ext))
            .collect()
    }

    /// Returns whether this writer can save the given selection of layers.
    pub fn accepts_layers(&self, layer_types: &[&str]) -> bool {
        let mut counts = BTreeMap::<&str, usize>::new();
        for layer_type in layer_types {
            *counts.entry(*layer_type).or_default() += 1;
        }

        let constraints = self.layer_constraints();
        if counts
            .keys()
            .any(|kind| !constraints.iter().any(|c| c.layer_type == *kind))
        {
            return false;
        }
        constraints
            .iter()
            .all(|c| c.allows(counts.get(c.layer_type).copied().unwrap_or(0)))
    }

    pub(crate) fn validate(&self, path: &str) -> ContributionResult<()> {
        require_command_id(&format!("{path}.command"), &self.command)?;
        if self.layer_types.is_empty() {
            return Err(ContributionError::invalid_field(
                format!("{path}.layer_types"),
                "[]",
                "at least one layer type is required",
            ));
        }
        for (index, value) in self.layer_types.iter().enumerate() {
            if LayerTypeConstraint::parse(value).is_none() {
                return Err(ContributionError::invalid_field(
                    format!("{path}.layer_types[{index}]"),
                    value.as_str(),
                    "expected `<layer>` with optional `?`, `+`, `*` or `{n,m}`",
                ));
            }
        }
        for (index, ext) in self.filename_extensions.iter().enumerate() {
            if normalize_extension(ext).is_none() {
                return Err(ContributionError::invalid_field(
                    format!("{path}.filename_extensions[{index}]"),
                    ext.as_str(),
                    "expected `.ext` or `*.ext`",
                ));
            }
        }
        Ok(())
    }
}

/// `.ext` or `*.ext` -> lowercased `.ext`; anything else is `None`.
fn normalize_extension(value: &str) -> Option<String> {
    let value = value.trim();
    let ext = value.strip_prefix('*').unwrap_or(value);
    let suffix = ext.strip_prefix('.')?;
    if suffix.is_empty() || suffix.starts_with('.') || suffix.contains(['*', '/', '\\']) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

impl Executable for WriterContribution {
    fn command(&self) -> &str {
        &self.command
    }
}
