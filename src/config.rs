//! Report configuration, persisted as TOML.
//!
//! ```toml
//! title = "Product 7.4"
//! output = "target/report"
//! version_pattern = '^.*[.-]redhat-[^.]+$'
//! parallel_writes = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::aggregate::{DEFAULT_VERSION_PATTERN, VersionPattern};
use crate::error::ConfigError;

/// Settings for one report run. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Display title of the summary page.
    #[serde(default = "default_title")]
    pub title: String,
    /// Report destination directory. Wiped on every run.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Regular expression well-formed versions must match.
    #[serde(default = "default_version_pattern")]
    pub version_pattern: String,
    /// Write pages concurrently.
    #[serde(default = "default_parallel_writes")]
    pub parallel_writes: bool,
}

fn default_title() -> String {
    "Repository".into()
}
fn default_output() -> PathBuf {
    PathBuf::from("report")
}
fn default_version_pattern() -> String {
    DEFAULT_VERSION_PATTERN.into()
}
fn default_parallel_writes() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            output: default_output(),
            version_pattern: default_version_pattern(),
            parallel_writes: default_parallel_writes(),
        }
    }
}

impl ReportConfig {
    /// Parse a config from TOML text. `origin` names the source in errors.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: "<memory>".into(),
            message: e.to_string(),
        })
    }

    pub fn compile_pattern(&self) -> Result<VersionPattern, ConfigError> {
        VersionPattern::new(&self.version_pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = ReportConfig::from_toml_str("", "empty").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.version_pattern, DEFAULT_VERSION_PATTERN);
        assert!(config.parallel_writes);
    }

    #[test]
    fn partial_file_overrides_fields() {
        let config = ReportConfig::from_toml_str(
            "title = \"Product 7.4\"\nversion_pattern = '-build\\d+$'\n",
            "partial",
        )
        .unwrap();
        assert_eq!(config.title, "Product 7.4");
        assert_eq!(config.output, PathBuf::from("report"));
        let pattern = config.compile_pattern().unwrap();
        assert!(pattern.matches("1.0-build3"));
        assert!(!pattern.matches("1.0.redhat-1"));
    }

    #[test]
    fn toml_roundtrip() {
        let config = ReportConfig {
            title: "X".into(),
            parallel_writes: false,
            ..Default::default()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(ReportConfig::from_toml_str(&text, "roundtrip").unwrap(), config);
    }

    #[test]
    fn bad_toml_and_bad_pattern() {
        assert!(matches!(
            ReportConfig::from_toml_str("title = ", "broken"),
            Err(ConfigError::Parse { .. })
        ));
        let config = ReportConfig {
            version_pattern: "[".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.compile_pattern(),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ReportConfig::load(Path::new("/nonexistent/repo-audit.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
