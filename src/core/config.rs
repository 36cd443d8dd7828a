//! Configuration system: TOML file + env var overrides + smart defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{CsfError, Result};
use crate::core::paths;
use crate::rules::catalog::Severity;

/// Full cloudsift configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub scan: ScanConfig,
    pub cache: CacheConfig,
    pub report: ReportConfig,
    pub paths: PathsConfig,
}

/// Scan behavior and user-supplied rule extensions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Extra risk rules appended after the builtin catalog.
    pub custom_rules: Vec<CustomRuleConfig>,
}

/// One user-supplied risk rule. Exactly one of `contains` / `regex` must be set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct CustomRuleConfig {
    pub category: String,
    pub severity: Severity,
    pub description: String,
    /// Case-insensitive substring match against the file name.
    pub contains: Option<String>,
    /// Case-insensitive regex match against the file name.
    pub regex: Option<String>,
}

/// Snapshot cache location and usage policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    pub dir: PathBuf,
    pub use_cache: bool,
}

/// Report rendering defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    pub format: String,
    pub color: bool,
}

/// Filesystem paths used by csift.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub config_file: PathBuf,
    pub jsonl_log: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: paths::default_snapshot_dir(),
            use_cache: true,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "table".to_string(),
            color: true,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            config_file: paths::default_config_file(),
            jsonl_log: paths::default_jsonl_log(),
        }
    }
}

/// Report formats accepted by `report.format` and `--format`.
pub const REPORT_FORMATS: &[&str] = &["table", "json", "csv", "markdown"];

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathsConfig::default().config_file
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from the default path;
    /// defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| CsfError::Io {
                path: path_buf.clone(),
                source,
            })?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(CsfError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.paths.config_file = path_buf;
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        set_env_path("CSIFT_CACHE_DIR", &mut self.cache.dir);
        set_env_bool("CSIFT_CACHE_USE_CACHE", &mut self.cache.use_cache)?;
        set_env_string("CSIFT_REPORT_FORMAT", &mut self.report.format);
        set_env_bool("CSIFT_REPORT_COLOR", &mut self.report.color)?;
        set_env_path("CSIFT_JSONL_LOG", &mut self.paths.jsonl_log);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !REPORT_FORMATS.contains(&self.report.format.as_str()) {
            return Err(CsfError::InvalidConfig {
                details: format!(
                    "report.format must be one of {REPORT_FORMATS:?}, got {:?}",
                    self.report.format
                ),
            });
        }

        if self.cache.dir.as_os_str().is_empty() {
            return Err(CsfError::InvalidConfig {
                details: "cache.dir must not be empty".to_string(),
            });
        }

        for rule in &self.scan.custom_rules {
            rule.validate()?;
        }

        Ok(())
    }
}

impl CustomRuleConfig {
    fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(CsfError::InvalidRule {
                category: self.category.clone(),
                details: "category must not be empty".to_string(),
            });
        }
        let has_contains = self.contains.as_deref().is_some_and(|s| !s.is_empty());
        let has_regex = self.regex.as_deref().is_some_and(|s| !s.is_empty());
        if has_contains == has_regex {
            return Err(CsfError::InvalidRule {
                category: self.category.clone(),
                details: "exactly one of `contains` or `regex` must be set".to_string(),
            });
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn set_env_string(name: &str, slot: &mut String) {
    if let Some(raw) = env_var(name) {
        *slot = raw;
    }
}

fn set_env_path(name: &str, slot: &mut PathBuf) {
    if let Some(raw) = env_var(name) {
        *slot = PathBuf::from(raw);
    }
}

fn set_env_bool(name: &str, slot: &mut bool) -> Result<()> {
    if let Some(raw) = env_var(name) {
        *slot = raw.parse::<bool>().map_err(|error| CsfError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: {error}"),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.report.format, "table");
        assert!(cfg.cache.use_cache);
    }

    #[test]
    fn parses_full_toml() {
        let raw = r#"
            [cache]
            dir = "/var/cache/csift"
            use_cache = false

            [report]
            format = "json"
            color = false

            [[scan.custom_rules]]
            category = "Internal Export"
            severity = "medium"
            description = "Company data export naming convention"
            contains = "confidential"
        "#;
        let cfg: Config = toml::from_str(raw).unwrap();
        assert_eq!(cfg.cache.dir, PathBuf::from("/var/cache/csift"));
        assert!(!cfg.cache.use_cache);
        assert_eq!(cfg.report.format, "json");
        assert_eq!(cfg.scan.custom_rules.len(), 1);
        assert_eq!(cfg.scan.custom_rules[0].severity, Severity::Medium);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn unknown_report_format_is_rejected() {
        let mut cfg = Config::default();
        cfg.report.format = "yaml".to_string();
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.code(), "CSF-1001");
    }

    #[test]
    fn custom_rule_requires_exactly_one_matcher() {
        let mut rule = CustomRuleConfig {
            category: "X".to_string(),
            severity: Severity::Low,
            description: String::new(),
            contains: None,
            regex: None,
        };
        assert_eq!(rule.validate().unwrap_err().code(), "CSF-1004");

        rule.contains = Some("a".to_string());
        rule.regex = Some("b".to_string());
        assert_eq!(rule.validate().unwrap_err().code(), "CSF-1004");

        rule.regex = None;
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert_eq!(err.code(), "CSF-1002");
    }

    #[test]
    fn load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        fs::write(&file, "[report]\nformat = \"markdown\"\n").unwrap();
        let cfg = Config::load(Some(&file)).unwrap();
        assert_eq!(cfg.report.format, "markdown");
        assert_eq!(cfg.paths.config_file, file);
    }
}
