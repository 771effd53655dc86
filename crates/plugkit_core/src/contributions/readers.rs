//! Reader contributions.
//!
//! # Invariants
//! - Filename patterns use shell-style `*` and `?` wildcards, matched
//!   case-insensitively against the file name only.
//! - Directories only match readers that set `accepts_directories`.

use crate::contributions::validation::{
    require_command_id, ContributionError, ContributionResult,
};
use crate::executable::Executable;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contribute a file reader.
///
/// Readers may be associated with specific filename patterns; the host
/// calls the command with a path and expects layer data (or nothing when the
/// reader declines the path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReaderContribution {
    pub command: String,
    /// Shell-style patterns, e.g. `*.tif`. `*` alone accepts every file.
    pub filename_patterns: Vec<String>,
    #[serde(default)]
    pub accepts_directories: bool,
}

/// Compiled filename patterns of one reader.
///
/// Build once with `ReaderContribution::matcher` and reuse it when matching
/// many paths.
#[derive(Debug, Clone)]
pub struct ReaderMatcher {
    patterns: Vec<Regex>,
    accepts_directories: bool,
}

impl ReaderMatcher {
    /// Returns whether the reader claims `path`.
    pub fn matches_path(&self, path: &Path) -> bool {
        if path.is_dir() && !self.accepts_directories {
            return false;
        }
        let Some(file_name) = path.file_name() else {
            return false;
        };
        let file_name = file_name.to_string_lossy();
        self.patterns.iter().any(|re| re.is_match(&file_name))
    }
}

impl ReaderContribution {
    /// Compiles `filename_patterns`.
    ///
    /// # Errors
    /// - `ContributionError::InvalidField` for a blank or uncompilable pattern.
    pub fn matcher(&self) -> ContributionResult<ReaderMatcher> {
        self.compile_patterns("filename_patterns")
    }

    /// One-off convenience over `matcher`; a reader with an invalid pattern
    /// claims nothing.
    pub fn matches_path(&self, path: &Path) -> bool {
        self.matcher()
            .is_ok_and(|matcher| matcher.matches_path(path))
    }

    pub(crate) fn validate(&self, path: &str) -> ContributionResult<()> {
        require_command_id(&format!("{path}.command"), &self.command)?;
        self.compile_patterns(&format!("{path}.filename_patterns"))?;
        Ok(())
    }

    fn compile_patterns(&self, field: &str) -> ContributionResult<ReaderMatcher> {
        let mut patterns = Vec::with_capacity(self.filename_patterns.len());
        for (index, pattern) in self.filename_patterns.iter().enumerate() {
            if pattern.trim().is_empty() {
                return Err(ContributionError::invalid_field(
                    format!("{field}[{index}]"),
                    pattern.as_str(),
                    "must not be empty",
                ));
            }
            let re = glob_to_regex(pattern).map_err(|_| {
                ContributionError::invalid_field(
                    format!("{field}[{index}]"),
                    pattern.as_str(),
                    "pattern does not compile",
                )
            })?;
            patterns.push(re);
        }
        Ok(ReaderMatcher {
            patterns,
            accepts_directories: self.accepts_directories,
        })
    }
}

impl Executable for ReaderContribution {
    fn command(&self) -> &str {
        &self.command
    }
}

fn glob_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut source = String::from("(?i)^");
    for c in pattern.trim().chars() {
        match c {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            other => source.push_str(&regex::escape(&other.to_string())),
        }
    }
    source.push('$');
    Regex::new(&source)
}

#[cfg(test)]
mod tests {
    use super::ReaderContribution;
    use std::path::Path;

    fn reader(patterns: &[&str], accepts_directories: bool) -> ReaderContribution {
        ReaderContribution {
            command: "my-plugin.read_tiff".to_string(),
            filename_patterns: patterns.iter().map(|p| p.to_string()).collect(),
            accepts_directories,
        }
    }

    #[test]
    fn matches_extension_patterns_case_insensitively() {
        let reader = reader(&["*.tif", "*.tiff"], false);
        assert!(reader.matches_path(Path::new("/data/cells.TIF")));
        assert!(reader.matches_path(Path::new("stack.tiff")));
        assert!(!reader.matches_path(Path::new("image.png")));
    }

    #[test]
    fn question_mark_matches_one_character() {
        let reader = reader(&["frame_?.npy"], false);
        assert!(reader.matches_path(Path::new("frame_1.npy")));
        assert!(!reader.matches_path(Path::new("frame_12.npy")));
    }

    #[test]
    fn patterns_match_file_name_inside_directories() {
        let reader = reader(&["frame_?.npy", "cells.tif"], false);
        assert!(reader.matches_path(Path::new("/data/frame_1.npy")));
        assert!(reader.matches_path(Path::new("/data/run/CELLS.tif")));
        assert!(reader.matches_path(Path::new("frame_1.npy")));
        assert!(!reader.matches_path(Path::new("/data/frame_1.npy/other.txt")));
    }

    #[test]
    fn compiled_matcher_is_reusable() {
        let matcher = reader(&["*.tif"], false)
            .matcher()
            .expect("patterns should compile");
        for name in ["/a/one.tif", "/b/two.TIF", "three.tif"] {
            assert!(matcher.matches_path(Path::new(name)), "{name} should match");
        }
        assert!(!matcher.matches_path(Path::new("/a/one.png")));
    }

    #[test]
    fn matcher_reports_blank_pattern() {
        let err = reader(&[""], false)
            .matcher()
            .expect_err("blank pattern must fail");
        assert!(err.to_string().contains("filename_patterns[0]"));
        assert!(!reader(&[""], true).matches_path(Path::new("any.tif")));
    }

    #[test]
    fn directories_require_opt_in() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(!reader(&["*"], false).matches_path(dir.path()));
        assert!(reader(&["*"], true).matches_path(dir.path()));
    }

    #[test]
    fn validate_rejects_blank_pattern() {
        let err = reader(&["*.tif", " "], false)
            .validate("readers[0]")
            .unwrap_err();
        assert!(err.to_string().contains("readers[0].filename_patterns[1]"));
    }

    #[test]
    fn accepts_directories_defaults_to_false() {
        let reader: ReaderContribution = serde_json::from_value(serde_json::json!({
            "command": "my-plugin.read",
            "filename_patterns": ["*.zarr"],
        }))
        .expect("reader should deserialize");
        assert!(!reader.accepts_directories);
    }
}
