//! Builtin risk-rule table: ordered categories of filename patterns that
//! suggest secret or sensitive material.
//!
//! The table is static data. It is never mutated at runtime; custom rules from
//! the config are layered on by [`crate::rules::classifier::RuleCatalog`]
//! without touching the builtin entries.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

/// Ordinal risk level attached to each rule category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    #[default]
    Low,
}

impl Severity {
    /// Ordinal rank used for sorting: HIGH=3, MEDIUM=2, LOW=1.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Uppercase display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One case-insensitive matcher over a lowercased file name.
///
/// Needles are stored lowercase; callers must lowercase the name first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatcher {
    Exact(&'static str),
    Prefix(&'static str),
    Suffix(&'static str),
    Contains(&'static str),
}

impl NameMatcher {
    /// Test against an already-lowercased name.
    #[must_use]
    pub fn matches(self, normalized: &str) -> bool {
        match self {
            Self::Exact(token) => normalized == token,
            Self::Prefix(token) => normalized.starts_with(token),
            Self::Suffix(token) => normalized.ends_with(token),
            Self::Contains(token) => normalized.contains(token),
        }
    }
}

/// One builtin classification rule: pattern set → category, severity, rationale.
#[derive(Debug, Clone, Copy)]
pub struct RiskRule {
    pub category: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub patterns: &'static [NameMatcher],
}

impl RiskRule {
    /// Whether any pattern in the set hits the lowercased name.
    #[must_use]
    pub fn hits(&self, normalized: &str) -> bool {
        self.patterns.iter().any(|m| m.matches(normalized))
    }
}

use NameMatcher::{Contains, Exact, Prefix, Suffix};
use Severity::{High, Low, Medium};

/// The ordered builtin catalog. Order is observable: a multi-match finding
/// lists its risks in this order, and reports group by first match.
pub const BUILTIN_RULES: &[RiskRule] = &[
    RiskRule {
        category: "Environment Configuration File",
        severity: High,
        description: "Dotenv files routinely hold API keys, database URLs, and service passwords",
        patterns: &[Exact(".env"), Prefix(".env."), Suffix(".env")],
    },
    RiskRule {
        category: "Cryptographic Private Key",
        severity: High,
        description: "Private key material grants impersonation and decryption capability",
        patterns: &[
            Suffix(".pem"),
            Suffix(".key"),
            Suffix(".p12"),
            Suffix(".pfx"),
            Suffix(".asc"),
        ],
    },
    RiskRule {
        category: "Certificate Store",
        severity: Medium,
        description: "Keystores and truststores bundle certificates and often private keys",
        patterns: &[Suffix(".jks"), Suffix(".keystore"), Suffix(".truststore")],
    },
    RiskRule {
        category: "SSH Key Material",
        severity: High,
        description: "SSH identity files grant shell access to any host trusting them",
        patterns: &[
            Prefix("id_rsa"),
            Prefix("id_dsa"),
            Prefix("id_ecdsa"),
            Prefix("id_ed25519"),
            Suffix(".ppk"),
        ],
    },
    RiskRule {
        category: "SSH Configuration",
        severity: Low,
        description: "SSH config and host lists reveal infrastructure topology",
        patterns: &[
            Exact("authorized_keys"),
            Exact("known_hosts"),
            Exact("ssh_config"),
        ],
    },
    RiskRule {
        category: "Cloud Provider Credentials",
        severity: High,
        description: "Cloud credential files grant programmatic account access",
        patterns: &[
            Exact("credentials"),
            Exact(".boto"),
            Contains("service-account"),
            Contains("service_account"),
            Contains("accesskey"),
        ],
    },
    RiskRule {
        category: "Password In Filename",
        severity: High,
        description: "Files named after passwords usually contain them",
        patterns: &[Contains("password"), Contains("passwort")],
    },
    RiskRule {
        category: "Secret In Filename",
        severity: High,
        description: "Files advertising secrets in their name usually deliver",
        patterns: &[Contains("secret")],
    },
    RiskRule {
        category: "Token In Filename",
        severity: High,
        description: "Bearer tokens and API keys stored as files are replayable credentials",
        patterns: &[
            Contains("token"),
            Contains("apikey"),
            Contains("api_key"),
            Contains("api-key"),
        ],
    },
    RiskRule {
        category: "System Password File",
        severity: High,
        description: "Unix account databases expose password hashes for offline cracking",
        patterns: &[Exact("shadow"), Exact("passwd"), Exact("gshadow")],
    },
    RiskRule {
        category: "Database File",
        severity: Medium,
        description: "Database files and SQL dumps frequently contain credentials and PII",
        patterns: &[
            Suffix(".sql"),
            Suffix(".sqlite"),
            Suffix(".sqlite3"),
            Suffix(".db"),
            Suffix(".mdb"),
            Suffix(".dump"),
        ],
    },
    RiskRule {
        category: "Backup File",
        severity: Medium,
        description: "Backups preserve sensitive content outside its access-controlled home",
        patterns: &[
            Suffix(".bak"),
            Suffix(".backup"),
            Suffix(".old"),
            Contains("backup"),
        ],
    },
    RiskRule {
        category: "Archive File",
        severity: Low,
        description: "Archives can wrap arbitrary sensitive trees in a single opaque file",
        patterns: &[
            Suffix(".zip"),
            Suffix(".tar"),
            Suffix(".tar.gz"),
            Suffix(".tgz"),
            Suffix(".7z"),
            Suffix(".rar"),
        ],
    },
    RiskRule {
        category: "Application Configuration File",
        severity: Medium,
        description: "Application configs commonly embed connection strings and passwords",
        patterns: &[
            Suffix(".conf"),
            Suffix(".cfg"),
            Suffix(".ini"),
            Suffix(".properties"),
            Suffix(".config"),
        ],
    },
    RiskRule {
        category: "Version Control Directory",
        severity: Medium,
        description: "VCS metadata exposes full history, including secrets committed then removed",
        patterns: &[Exact(".git"), Exact(".svn"), Exact(".hg")],
    },
    RiskRule {
        category: "Git Credentials",
        severity: High,
        description: "Stored git credentials are plaintext tokens for code hosting accounts",
        patterns: &[Exact(".git-credentials")],
    },
    RiskRule {
        category: "Container Configuration",
        severity: Medium,
        description: "Registry and cluster configs hold auth entries for container infrastructure",
        patterns: &[
            Exact(".dockercfg"),
            Exact("dockercfg"),
            Exact("kubeconfig"),
            Suffix(".kubeconfig"),
        ],
    },
    RiskRule {
        category: "Financial Document",
        severity: Medium,
        description: "Payroll and banking documents carry account and salary data",
        patterns: &[
            Contains("salary"),
            Contains("payroll"),
            Contains("invoice"),
            Prefix("tax-"),
            Prefix("tax_"),
        ],
    },
    RiskRule {
        category: "Identity Document",
        severity: High,
        description: "Identity documents enable impersonation and account recovery fraud",
        patterns: &[
            Contains("passport"),
            Contains("ssn"),
            Contains("social-security"),
            Contains("social_security"),
        ],
    },
    RiskRule {
        category: "Medical Record",
        severity: Medium,
        description: "Medical documents are regulated personal data",
        patterns: &[
            Contains("medical"),
            Contains("diagnosis"),
            Contains("prescription"),
            Contains("lab-result"),
            Contains("lab_result"),
        ],
    },
    RiskRule {
        category: "Email Archive",
        severity: Medium,
        description: "Mailbox exports aggregate years of correspondence and reset links",
        patterns: &[Suffix(".pst"), Suffix(".ost"), Suffix(".mbox")],
    },
    RiskRule {
        category: "Package Manager Configuration",
        severity: Medium,
        description: "Registry configs often carry publish tokens and mirror passwords",
        patterns: &[
            Exact(".npmrc"),
            Exact(".pypirc"),
            Exact("pip.conf"),
            Exact("settings.xml"),
            Exact("credentials.toml"),
        ],
    },
    RiskRule {
        category: "Password Manager Vault",
        severity: High,
        description: "Vault files concentrate every credential the owner has",
        patterns: &[
            Suffix(".kdbx"),
            Suffix(".kdb"),
            Suffix(".1pif"),
            Suffix(".opvault"),
            Suffix(".agilekeychain"),
            Suffix(".psafe3"),
        ],
    },
    RiskRule {
        category: "Remote Access Configuration",
        severity: High,
        description: "Connection profiles embed hosts, usernames, and saved passwords",
        patterns: &[
            Exact(".netrc"),
            Suffix(".rdp"),
            Suffix(".ovpn"),
            Exact("filezilla.xml"),
        ],
    },
    RiskRule {
        category: "Log File",
        severity: Low,
        description: "Logs leak tokens, session ids, and internal hostnames",
        patterns: &[Suffix(".log")],
    },
    RiskRule {
        category: "Structured Configuration File",
        severity: Low,
        description: "YAML/TOML configs are a common resting place for inline credentials",
        patterns: &[Suffix(".yaml"), Suffix(".yml"), Suffix(".toml")],
    },
    RiskRule {
        category: "Crash Dump",
        severity: Medium,
        description: "Memory dumps can contain keys and passwords captured from a live process",
        patterns: &[
            Suffix(".dmp"),
            Suffix(".mdmp"),
            Suffix(".crash"),
            Exact("core"),
        ],
    },
    RiskRule {
        category: "Shell History",
        severity: Medium,
        description: "Shell history records inline passwords and connection strings",
        patterns: &[Suffix("_history"), Exact(".history")],
    },
    RiskRule {
        category: "Cryptocurrency Wallet",
        severity: High,
        description: "Wallet files are directly spendable assets",
        patterns: &[Exact("wallet.dat"), Suffix(".wallet")],
    },
    RiskRule {
        category: "Kerberos Keytab",
        severity: High,
        description: "Keytabs authenticate as a service principal without a password",
        patterns: &[Suffix(".keytab")],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_categories_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for rule in BUILTIN_RULES {
            assert!(seen.insert(rule.category), "duplicate {}", rule.category);
        }
    }

    #[test]
    fn catalog_needles_are_lowercase() {
        for rule in BUILTIN_RULES {
            for matcher in rule.patterns {
                let needle = match *matcher {
                    NameMatcher::Exact(t)
                    | NameMatcher::Prefix(t)
                    | NameMatcher::Suffix(t)
                    | NameMatcher::Contains(t) => t,
                };
                assert_eq!(
                    needle,
                    needle.to_lowercase(),
                    "needle {needle:?} in {} must be lowercase",
                    rule.category
                );
                assert!(!needle.is_empty());
            }
        }
    }

    #[test]
    fn severity_ranks_are_ordinal() {
        assert_eq!(Severity::High.rank(), 3);
        assert_eq!(Severity::Medium.rank(), 2);
        assert_eq!(Severity::Low.rank(), 1);
        assert!(Severity::High.rank() > Severity::Medium.rank());
        assert!(Severity::Medium.rank() > Severity::Low.rank());
    }

    #[test]
    fn severity_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
        let parsed: Severity = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, Severity::Medium);
    }

    #[test]
    fn matcher_kinds_behave() {
        assert!(NameMatcher::Exact(".env").matches(".env"));
        assert!(!NameMatcher::Exact(".env").matches("prod.env"));
        assert!(NameMatcher::Prefix("id_rsa").matches("id_rsa.pub"));
        assert!(NameMatcher::Suffix(".pem").matches("server.pem"));
        assert!(NameMatcher::Contains("secret").matches("my-secrets.txt"));
        assert!(!NameMatcher::Contains("secret").matches("notes.txt"));
    }

    #[test]
    fn env_rule_is_first_and_high() {
        let rule = &BUILTIN_RULES[0];
        assert_eq!(rule.category, "Environment Configuration File");
        assert_eq!(rule.severity, Severity::High);
        assert!(rule.hits(".env"));
        assert!(rule.hits(".env.production"));
        assert!(rule.hits("staging.env"));
    }

    #[test]
    fn database_rule_precedes_backup_rule() {
        let db = BUILTIN_RULES
            .iter()
            .position(|r| r.category == "Database File")
            .unwrap();
        let bak = BUILTIN_RULES
            .iter()
            .position(|r| r.category == "Backup File")
            .unwrap();
        assert!(db < bak, "multi-match order for *-backup.sql depends on this");
    }
}
