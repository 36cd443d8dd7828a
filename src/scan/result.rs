//! Scan artifacts: findings, summary, and the persisted `ScanResult`.

#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rules::catalog::Severity;
use crate::rules::classifier::RiskMatch;
use crate::scan::record::FileRecord;
use crate::scan::tree::TreeNode;

/// One flagged file: the record, every matched rule in catalog order, and the
/// resolved display path of its containing folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub record: FileRecord,
    pub risks: Vec<RiskMatch>,
    pub folder_path: String,
}

impl Finding {
    /// Highest severity among this finding's matches.
    ///
    /// Findings are only created for non-empty match lists; an empty list
    /// ranks as LOW rather than panicking.
    #[must_use]
    pub fn max_severity(&self) -> Severity {
        self.risks
            .iter()
            .map(|r| r.severity)
            .max_by_key(|s| s.rank())
            .unwrap_or(Severity::Low)
    }
}

/// Order findings by descending maximum severity.
///
/// The sort is stable: findings with equal maximum severity keep their
/// discovery order, so two scans over an unchanged listing agree exactly.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by(|a, b| b.max_severity().rank().cmp(&a.max_severity().rank()));
}

/// Aggregate counters for one completed scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total_records_scanned: u64,
    pub finding_count: u64,
    pub scan_timestamp: DateTime<Utc>,
    pub provider_label: String,
}

/// Complete scan artifact: ordered findings, reconstructed tree, summary.
///
/// This is the unit persisted to and restored from the snapshot cache, and
/// the sole artifact handed to reporting. Field names follow the persisted
/// JSON shape consumed by downstream tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(rename = "vulnerableFiles")]
    pub findings: Vec<Finding>,
    #[serde(rename = "fileTree")]
    pub tree: TreeNode,
    pub summary: ScanSummary,
}
