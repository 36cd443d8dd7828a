//! Normalized listing entries shared by every provider.

#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provider-specific location of a record within the account.
///
/// Exactly one style is used per provider: parent-graph listings carry parent
/// ids (first entry is the primary parent, empty means root-level), flat-path
/// listings carry a slash-delimited path from the storage root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordLocator {
    ParentIds(Vec<String>),
    FullPath(String),
}

/// One normalized file or folder entry from a provider listing.
///
/// Created during enumeration and immutable afterward; the scan coordinator
/// owns the full record set for the duration of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub is_folder: bool,
    pub size: Option<u64>,
    pub modified: DateTime<Utc>,
    pub locator: RecordLocator,
}

impl FileRecord {
    /// Primary parent id for parent-graph records; `None` for root-level
    /// records and for flat-path records.
    #[must_use]
    pub fn primary_parent(&self) -> Option<&str> {
        match &self.locator {
            RecordLocator::ParentIds(parents) => parents.first().map(String::as_str),
            RecordLocator::FullPath(_) => None,
        }
    }

    /// Materialized path for flat-path records.
    #[must_use]
    pub fn full_path(&self) -> Option<&str> {
        match &self.locator {
            RecordLocator::FullPath(path) => Some(path.as_str()),
            RecordLocator::ParentIds(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn primary_parent_is_first_id() {
        let record = FileRecord {
            id: "f1".to_string(),
            name: "report.pdf".to_string(),
            is_folder: false,
            size: Some(1024),
            modified: ts(),
            locator: RecordLocator::ParentIds(vec!["p1".to_string(), "p2".to_string()]),
        };
        assert_eq!(record.primary_parent(), Some("p1"));
        assert_eq!(record.full_path(), None);
    }

    #[test]
    fn empty_parent_list_means_root_level() {
        let record = FileRecord {
            id: "f1".to_string(),
            name: "report.pdf".to_string(),
            is_folder: false,
            size: None,
            modified: ts(),
            locator: RecordLocator::ParentIds(Vec::new()),
        };
        assert_eq!(record.primary_parent(), None);
    }

    #[test]
    fn locator_round_trips_through_json() {
        let record = FileRecord {
            id: "x".to_string(),
            name: "a.txt".to_string(),
            is_folder: false,
            size: Some(5),
            modified: ts(),
            locator: RecordLocator::FullPath("/docs/a.txt".to_string()),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: FileRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.full_path(), Some("/docs/a.txt"));
    }
}
