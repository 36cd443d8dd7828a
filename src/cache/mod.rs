//! Snapshot cache: one persisted `ScanResult` per provider key.
//!
//! Snapshots are plain JSON files written via temp-file + atomic rename.
//! There is no expiry policy: a snapshot stays valid until overwritten, and
//! staleness is the caller's concern via `summary.scan_timestamp`. A missing
//! or unparseable snapshot is a *miss*, never a fatal error — callers fall
//! back to a live scan.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::errors::{CsfError, Result};
use crate::scan::result::ScanResult;

/// File-backed snapshot store keyed by provider label.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    dir: PathBuf,
}

impl SnapshotCache {
    /// Cache rooted at `dir`; the directory is created lazily on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the snapshot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Snapshot file path for a provider key.
    #[must_use]
    pub fn snapshot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }

    /// Persist a snapshot, overwriting any prior one for the same key.
    pub fn save(&self, key: &str, result: &ScanResult) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| CsfError::io(&self.dir, source))?;

        let path = self.snapshot_path(key);
        let tmp_path = path.with_extension("tmp");
        let data = serde_json::to_vec_pretty(result)?;

        fs::write(&tmp_path, data).map_err(|source| CsfError::io(&tmp_path, source))?;
        fs::rename(&tmp_path, &path).map_err(|source| CsfError::io(&path, source))?;
        Ok(())
    }

    /// Load the snapshot for a provider key.
    ///
    /// Returns [`CsfError::SnapshotMiss`] when no snapshot exists or the
    /// stored data no longer parses as a `ScanResult`.
    pub fn load(&self, key: &str) -> Result<ScanResult> {
        let path = self.snapshot_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(CsfError::SnapshotMiss {
                    key: key.to_string(),
                });
            }
            Err(source) => return Err(CsfError::io(&path, source)),
        };
        serde_json::from_str(&raw).map_err(|_| CsfError::SnapshotMiss {
            key: key.to_string(),
        })
    }

    /// Remove the snapshot for a key; absent snapshots are not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.snapshot_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CsfError::io(&path, source)),
        }
    }

    /// Keys of all stored snapshots, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(CsfError::io(&self.dir, source)),
        };
        let mut keys: Vec<String> = entries
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) == Some("json") {
                    path.file_stem()
                        .and_then(|s| s.to_str())
                        .map(str::to_string)
                } else {
                    None
                }
            })
            .collect();
        keys.sort();
        Ok(keys)
    }
}

/// Restrict keys to a filesystem-safe alphabet.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::record::{FileRecord, RecordLocator};
    use crate::scan::result::{Finding, ScanSummary};
    use crate::scan::tree::{TreeNode, build_flat_path_tree};
    use crate::rules::catalog::Severity;
    use crate::rules::classifier::RiskMatch;
    use chrono::{TimeZone, Utc};

    fn sample_result() -> ScanResult {
        let record = FileRecord {
            id: "p1".to_string(),
            name: "secret.key".to_string(),
            is_folder: false,
            size: Some(512),
            modified: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            locator: RecordLocator::FullPath("/a/b/secret.key".to_string()),
        };
        let tree = build_flat_path_tree(std::slice::from_ref(&record));
        ScanResult {
            findings: vec![Finding {
                record,
                risks: vec![RiskMatch {
                    category: "Cryptographic Private Key".to_string(),
                    severity: Severity::High,
                    description: "test".to_string(),
                }],
                folder_path: "/a/b".to_string(),
            }],
            tree,
            summary: ScanSummary {
                total_records_scanned: 1,
                finding_count: 1,
                scan_timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
                provider_label: "dropbox".to_string(),
            },
        }
    }

    #[test]
    fn save_then_load_round_trips_by_value() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        let result = sample_result();
        cache.save("dropbox", &result).unwrap();
        let loaded = cache.load("dropbox").unwrap();
        assert_eq!(loaded, result);
    }

    #[test]
    fn missing_snapshot_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        let err = cache.load("google_drive").unwrap_err();
        assert!(err.is_snapshot_miss());
    }

    #[test]
    fn corrupt_snapshot_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(cache.snapshot_path("dropbox"), "{not-json").unwrap();
        let err = cache.load("dropbox").unwrap_err();
        assert!(err.is_snapshot_miss());
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        let mut result = sample_result();
        cache.save("dropbox", &result).unwrap();
        result.summary.total_records_scanned = 99;
        cache.save("dropbox", &result).unwrap();
        let loaded = cache.load("dropbox").unwrap();
        assert_eq!(loaded.summary.total_records_scanned, 99);
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("snapshots");
        let cache = SnapshotCache::new(&nested);
        cache.save("dropbox", &sample_result()).unwrap();
        assert!(cache.snapshot_path("dropbox").exists());
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        cache.save("dropbox", &sample_result()).unwrap();
        cache.remove("dropbox").unwrap();
        assert!(!cache.snapshot_path("dropbox").exists());
        cache.remove("dropbox").unwrap();
    }

    #[test]
    fn list_returns_sorted_keys() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        cache.save("dropbox", &sample_result()).unwrap();
        cache.save("google_drive", &sample_result()).unwrap();
        assert_eq!(
            cache.list().unwrap(),
            vec!["dropbox".to_string(), "google_drive".to_string()]
        );
    }

    #[test]
    fn keys_are_sanitized_for_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        let path = cache.snapshot_path("../evil key");
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("---evil-key.json")
        );
        assert!(path.starts_with(dir.path()));
    }

    #[test]
    fn loaded_tree_preserves_structure() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        cache.save("dropbox", &sample_result()).unwrap();
        let loaded = cache.load("dropbox").unwrap();
        let TreeNode::Folder { children, .. } = &loaded.tree else {
            panic!("root must be a folder");
        };
        assert!(children.contains_key("a"));
    }
}
