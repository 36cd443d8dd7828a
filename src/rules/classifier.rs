//! Name-only risk classification over the rule catalog.
//!
//! Classification never looks at a record's path or contents: the spec of the
//! original service is explicit that only the entry *name* is matched, so a
//! harmless name inside a suspicious folder stays clean and vice versa.

#![allow(missing_docs)]

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::core::config::CustomRuleConfig;
use crate::core::errors::{CsfError, Result};
use crate::rules::catalog::{BUILTIN_RULES, RiskRule, Severity};
use crate::scan::record::FileRecord;

/// One matched rule, as recorded on a finding and persisted in snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskMatch {
    pub category: String,
    pub severity: Severity,
    pub description: String,
}

/// User-supplied rule compiled for matching.
#[derive(Debug, Clone)]
pub struct CustomRule {
    pub category: String,
    pub severity: Severity,
    pub description: String,
    matcher: CustomMatcher,
}

#[derive(Debug, Clone)]
enum CustomMatcher {
    Contains(String),
    Regex(regex::Regex),
}

impl CustomRule {
    fn hits(&self, normalized: &str) -> bool {
        match &self.matcher {
            CustomMatcher::Contains(needle) => normalized.contains(needle),
            CustomMatcher::Regex(re) => re.is_match(normalized),
        }
    }
}

/// Immutable rule catalog: the builtin table plus optional custom rules.
///
/// Built once at startup and passed by reference into every classification
/// call; there is no process-global registry.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    custom: Vec<CustomRule>,
}

impl RuleCatalog {
    /// Catalog with builtin rules only.
    #[must_use]
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Catalog with builtin rules plus compiled custom rules from config.
    ///
    /// Custom regexes are compiled case-insensitive; a malformed pattern is a
    /// configuration error, not a scan-time failure.
    pub fn with_custom(rules: &[CustomRuleConfig]) -> Result<Self> {
        let mut custom = Vec::with_capacity(rules.len());
        for rule in rules {
            let matcher = if let Some(needle) = rule.contains.as_deref().filter(|s| !s.is_empty())
            {
                CustomMatcher::Contains(needle.to_lowercase())
            } else if let Some(pattern) = rule.regex.as_deref().filter(|s| !s.is_empty()) {
                let re = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|error| CsfError::InvalidRule {
                        category: rule.category.clone(),
                        details: error.to_string(),
                    })?;
                CustomMatcher::Regex(re)
            } else {
                return Err(CsfError::InvalidRule {
                    category: rule.category.clone(),
                    details: "exactly one of `contains` or `regex` must be set".to_string(),
                });
            };
            custom.push(CustomRule {
                category: rule.category.clone(),
                severity: rule.severity,
                description: rule.description.clone(),
                matcher,
            });
        }
        Ok(Self { custom })
    }

    /// Builtin rules in catalog order.
    #[must_use]
    pub fn builtin_rules(&self) -> &'static [RiskRule] {
        BUILTIN_RULES
    }

    /// Custom rules in config order (matched after all builtins).
    #[must_use]
    pub fn custom_rules(&self) -> &[CustomRule] {
        &self.custom
    }

    /// Total rule count, builtin plus custom.
    #[must_use]
    pub fn len(&self) -> usize {
        BUILTIN_RULES.len() + self.custom.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false // the builtin table is never empty
    }

    /// Classify one record by name, in catalog order.
    ///
    /// Folders are never classified. A record accumulates one match per rule
    /// whose pattern set has at least one hit; matches are not deduplicated.
    #[must_use]
    pub fn classify(&self, record: &FileRecord) -> Vec<RiskMatch> {
        if record.is_folder {
            return Vec::new();
        }
        let normalized = record.name.to_lowercase();

        let mut matches = Vec::new();
        for rule in BUILTIN_RULES {
            if rule.hits(&normalized) {
                matches.push(RiskMatch {
                    category: rule.category.to_string(),
                    severity: rule.severity,
                    description: rule.description.to_string(),
                });
            }
        }
        for rule in &self.custom {
            if rule.hits(&normalized) {
                matches.push(RiskMatch {
                    category: rule.category.clone(),
                    severity: rule.severity,
                    description: rule.description.clone(),
                });
            }
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::record::{FileRecord, RecordLocator};
    use chrono::{TimeZone, Utc};

    fn file(name: &str) -> FileRecord {
        FileRecord {
            id: format!("id-{name}"),
            name: name.to_string(),
            is_folder: false,
            size: Some(128),
            modified: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            locator: RecordLocator::FullPath(format!("/{name}")),
        }
    }

    fn folder(name: &str) -> FileRecord {
        FileRecord {
            is_folder: true,
            size: None,
            ..file(name)
        }
    }

    #[test]
    fn dotenv_is_high_severity_environment_file() {
        let catalog = RuleCatalog::builtin();
        let risks = catalog.classify(&file(".env"));
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].category, "Environment Configuration File");
        assert_eq!(risks[0].severity, Severity::High);
    }

    #[test]
    fn plain_text_note_is_clean() {
        let catalog = RuleCatalog::builtin();
        assert!(catalog.classify(&file("notes.txt")).is_empty());
    }

    #[test]
    fn db_backup_sql_matches_database_first() {
        let catalog = RuleCatalog::builtin();
        let risks = catalog.classify(&file("db-backup.sql"));
        assert!(risks.len() >= 2, "expected database + backup matches");
        assert_eq!(risks[0].category, "Database File");
        assert_eq!(risks[0].severity, Severity::Medium);
        assert!(risks.iter().any(|r| r.category == "Backup File"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let catalog = RuleCatalog::builtin();
        let risks = catalog.classify(&file("Passwords.XLSX"));
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].category, "Password In Filename");
    }

    #[test]
    fn folders_are_never_classified() {
        let catalog = RuleCatalog::builtin();
        // Even a folder literally named .env stays clean; folders only appear
        // in the tree.
        assert!(catalog.classify(&folder(".env")).is_empty());
        assert!(catalog.classify(&folder("passwords")).is_empty());
    }

    #[test]
    fn multi_match_preserves_catalog_order() {
        let catalog = RuleCatalog::builtin();
        // secret.key: Cryptographic Private Key (suffix .key) then
        // Secret In Filename (contains "secret"), in catalog order.
        let risks = catalog.classify(&file("secret.key"));
        assert_eq!(risks.len(), 2);
        assert_eq!(risks[0].category, "Cryptographic Private Key");
        assert_eq!(risks[1].category, "Secret In Filename");
    }

    #[test]
    fn custom_contains_rule_matches_after_builtins() {
        let configs = vec![CustomRuleConfig {
            category: "Internal Export".to_string(),
            severity: Severity::Medium,
            description: "Company export convention".to_string(),
            contains: Some("CONFIDENTIAL".to_string()),
            regex: None,
        }];
        let catalog = RuleCatalog::with_custom(&configs).unwrap();
        let risks = catalog.classify(&file("confidential-roadmap.pdf"));
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].category, "Internal Export");
    }

    #[test]
    fn custom_regex_rule_is_case_insensitive() {
        let configs = vec![CustomRuleConfig {
            category: "Quarter Report".to_string(),
            severity: Severity::Low,
            description: String::new(),
            contains: None,
            regex: Some(r"^q[1-4]-report".to_string()),
        }];
        let catalog = RuleCatalog::with_custom(&configs).unwrap();
        assert_eq!(catalog.classify(&file("Q3-Report.docx")).len(), 1);
        assert!(catalog.classify(&file("annual-report.docx")).is_empty());
    }

    #[test]
    fn malformed_custom_regex_is_a_config_error() {
        let configs = vec![CustomRuleConfig {
            category: "Broken".to_string(),
            severity: Severity::Low,
            description: String::new(),
            contains: None,
            regex: Some("[unclosed".to_string()),
        }];
        let err = RuleCatalog::with_custom(&configs).unwrap_err();
        assert_eq!(err.code(), "CSF-1004");
    }

    #[test]
    fn k_matching_rules_produce_k_risks() {
        let catalog = RuleCatalog::builtin();
        // password-backup.zip: Password In Filename, Backup File, Archive File.
        let risks = catalog.classify(&file("password-backup.zip"));
        assert_eq!(risks.len(), 3);
        let cats: Vec<&str> = risks.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(
            cats,
            vec!["Password In Filename", "Backup File", "Archive File"]
        );
    }
}
