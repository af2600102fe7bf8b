//! Report configuration loaded from TOML.
//!
//! ```toml
//! output = "report.md"
//! base_dir = "target/docs"
//! console = true
//! muted = false
//! header_level = 2
//!
//! [conditions]
//! name = "Jane"
//! ```

use crate::error::ReportError;
use crate::markdown::HeaderLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for building a file-backed reporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Report file, relative to `base_dir` (or the working directory).
    pub output: PathBuf,

    /// Directory `output` is resolved against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,

    /// Mirror `log` calls to stdout.
    #[serde(default = "default_console")]
    pub console: bool,

    /// Initial mute flag.
    #[serde(default)]
    pub muted: bool,

    /// Level used by `Reporter::header` callers that do not pick one.
    #[serde(default)]
    pub header_level: HeaderLevel,

    /// Initial condition record.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub conditions: BTreeMap<String, String>,
}

fn default_console() -> bool {
    true
}

impl ReportConfig {
    /// Config with defaults for everything except the output file.
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            base_dir: None,
            console: default_console(),
            muted: false,
            header_level: HeaderLevel::default(),
            conditions: BTreeMap::new(),
        }
    }

    /// Parse and validate TOML text. `origin` is only used in errors.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ReportError> {
        let config: Self = toml::from_str(text).map_err(|source| ReportError::ParseConfig {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ReportError::ReadConfig {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if self.output.as_os_str().is_empty() {
            return Err(ReportError::InvalidConfig(
                "output must not be empty".to_string(),
            ));
        }
        if self.output.is_absolute() {
            return Err(ReportError::InvalidConfig(format!(
                "output must be relative, got {}",
                self.output.display()
            )));
        }
        if let Some(key) = self.conditions.keys().find(|key| key.is_empty()) {
            return Err(ReportError::InvalidConfig(format!(
                "condition keys must not be empty (value {:?})",
                self.conditions[key]
            )));
        }
        Ok(())
    }

    /// Directory the output path is resolved against.
    pub fn resolve_base(&self) -> Result<PathBuf, ReportError> {
        match &self.base_dir {
            Some(dir) if dir.is_absolute() => Ok(dir.clone()),
            Some(dir) => Ok(std::env::current_dir()
                .map_err(ReportError::CurrentDir)?
                .join(dir)),
            None => std::env::current_dir().map_err(ReportError::CurrentDir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config =
            ReportConfig::from_toml_str("output = \"report.md\"\n", "inline").expect("valid");
        assert_eq!(config, ReportConfig::new("report.md"));
        assert!(config.console);
        assert!(!config.muted);
        assert_eq!(config.header_level, HeaderLevel::H2);
    }

    #[test]
    fn full_config_parses() {
        let text = r#"
output = "docs/salaries.md"
base_dir = "target"
console = false
muted = true
header_level = 3

[conditions]
name = "Jane"
"#;
        let config = ReportConfig::from_toml_str(text, "inline").expect("valid");
        assert_eq!(config.output, PathBuf::from("docs/salaries.md"));
        assert_eq!(config.base_dir, Some(PathBuf::from("target")));
        assert!(!config.console);
        assert!(config.muted);
        assert_eq!(config.header_level, HeaderLevel::H3);
        assert_eq!(
            config.conditions.get("name").map(String::as_str),
            Some("Jane")
        );
    }

    #[test]
    fn header_level_out_of_range_is_rejected() {
        let err = ReportConfig::from_toml_str("output = \"r.md\"\nheader_level = 7\n", "inline")
            .expect_err("level 7 must fail");
        assert!(matches!(err, ReportError::ParseConfig { .. }));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = ReportConfig::from_toml_str("output = \"r.md\"\ncolour = true\n", "inline")
            .expect_err("unknown field must fail");
        assert!(matches!(err, ReportError::ParseConfig { .. }));
    }

    #[test]
    fn missing_output_is_rejected() {
        let err = ReportConfig::from_toml_str("console = true\n", "inline")
            .expect_err("output is required");
        assert!(matches!(err, ReportError::ParseConfig { .. }));
    }

    #[test]
    fn empty_output_is_invalid() {
        let err = ReportConfig::from_toml_str("output = \"\"\n", "inline")
            .expect_err("empty output must fail");
        assert!(matches!(err, ReportError::InvalidConfig(_)));
    }

    #[test]
    fn empty_condition_key_is_invalid() {
        let err = ReportConfig::from_toml_str("output = \"r.md\"\n[conditions]\n\"\" = \"x\"\n", "inline")
            .expect_err("empty key must fail");
        assert!(matches!(err, ReportError::InvalidConfig(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ReportConfig::load("/definitely/not/here/mdtrace.toml")
            .expect_err("missing file must fail");
        assert!(matches!(err, ReportError::ReadConfig { .. }));
    }
}
