//! Listing-source traits: the remote boundary the engine consumes.
//!
//! A listing source is the only thing a provider integration must supply.
//! OAuth, token refresh, and HTTP wiring live with the integration, behind
//! these traits; the engine itself never talks to the network directly.

#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::errors::Result;
use crate::scan::record::{FileRecord, RecordLocator};

/// Provider-native entry from a parent-graph listing (Drive-style).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEntry {
    pub id: String,
    pub name: String,
    pub is_folder: bool,
    #[serde(default)]
    pub size: Option<u64>,
    pub modified: DateTime<Utc>,
    /// Ordered parent ids; first is the primary parent. Empty = root-level.
    #[serde(default)]
    pub parent_ids: Vec<String>,
    /// Soft-deleted entries are fetched but never scanned or placed in the tree.
    #[serde(default)]
    pub trashed: bool,
}

/// Provider-native entry from a flat-path listing (Dropbox-style).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    pub id: String,
    pub name: String,
    pub is_folder: bool,
    #[serde(default)]
    pub size: Option<u64>,
    pub modified: DateTime<Utc>,
    /// Slash-delimited path from the storage root, e.g. `/work/keys/ca.pem`.
    pub path: String,
}

/// One page of a parent-graph listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphPage {
    pub entries: Vec<GraphEntry>,
    /// Continuation token; absent when this is the final page.
    pub next_token: Option<String>,
}

/// One page of a flat-path listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPage {
    pub entries: Vec<PathEntry>,
    /// Continuation cursor; absent when this is the final page.
    pub next_cursor: Option<String>,
}

/// Folder metadata returned by per-id lookups on parent-graph providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderMetadata {
    pub name: String,
    #[serde(default)]
    pub parent_ids: Vec<String>,
}

/// Paginated listing of a parent-graph provider, plus per-id folder lookups
/// for ancestors that never appeared in the listing (shared drives, items
/// owned by other accounts).
pub trait ParentGraphSource {
    /// Fetch one page. `None` token requests the first page. Errors here are
    /// fatal to the scan.
    fn list_page(&mut self, token: Option<&str>) -> Result<GraphPage>;

    /// Fetch name and parents for a single folder id. Errors here degrade the
    /// caller's path resolution, never the scan.
    fn entry_metadata(&mut self, id: &str) -> Result<FolderMetadata>;
}

/// Paginated listing of a flat-path provider. Paths arrive materialized, so
/// no per-id lookups exist on this side.
pub trait FlatPathSource {
    /// Fetch one page. `None` cursor requests the first page. Errors here are
    /// fatal to the scan.
    fn list_page(&mut self, cursor: Option<&str>) -> Result<PathPage>;
}

impl From<GraphEntry> for FileRecord {
    fn from(entry: GraphEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            is_folder: entry.is_folder,
            size: entry.size,
            modified: entry.modified,
            locator: RecordLocator::ParentIds(entry.parent_ids),
        }
    }
}

impl From<PathEntry> for FileRecord {
    fn from(entry: PathEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            is_folder: entry.is_folder,
            size: entry.size,
            modified: entry.modified,
            locator: RecordLocator::FullPath(entry.path),
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
    fn graph_entry_normalizes_to_parent_ids_locator() {
        let entry = GraphEntry {
            id: "g1".to_string(),
            name: "keys".to_string(),
            is_folder: true,
            size: None,
            modified: ts(),
            parent_ids: vec!["root-folder".to_string()],
            trashed: false,
        };
        let record: FileRecord = entry.into();
        assert!(record.is_folder);
        assert_eq!(record.primary_parent(), Some("root-folder"));
    }

    #[test]
    fn path_entry_normalizes_to_full_path_locator() {
        let entry = PathEntry {
            id: "p1".to_string(),
            name: "ca.pem".to_string(),
            is_folder: false,
            size: Some(2048),
            modified: ts(),
            path: "/work/keys/ca.pem".to_string(),
        };
        let record: FileRecord = entry.into();
        assert_eq!(record.full_path(), Some("/work/keys/ca.pem"));
        assert_eq!(record.size, Some(2048));
    }

    #[test]
    fn graph_entry_deserializes_with_defaults() {
        let raw = r#"{
            "id": "a",
            "name": "report.pdf",
            "is_folder": false,
            "modified": "2024-05-01T12:00:00Z"
        }"#;
        let entry: GraphEntry = serde_json::from_str(raw).unwrap();
        assert!(entry.parent_ids.is_empty());
        assert_eq!(entry.size, None);
        assert!(!entry.trashed);
    }
}
