//! Provider enumerators: paginated retrieval of the complete file set.
//!
//! Pagination is an explicit loop over a continuation token, never
//! self-recursion — very large accounts must not grow the call stack. One
//! page is outstanding at a time; the caller classifies a page fully before
//! asking for the next.

#![allow(missing_docs)]

use std::collections::{HashMap, HashSet};

use crate::core::errors::Result;
use crate::providers::Provider;
use crate::scan::record::{FileRecord, RecordLocator};
use crate::scan::source::{FlatPathSource, FolderMetadata, ParentGraphSource};

/// Display path of the storage root, and the degraded fallback for any record
/// whose ancestry cannot be resolved.
pub const ROOT_PATH: &str = "/";

/// Which tree-builder a record set from this enumerator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HierarchyModel {
    ParentGraph,
    FlatPath,
}

/// Capability interface over the two provider listing models.
///
/// The scan coordinator is generic over this trait and never over a concrete
/// provider type.
pub trait ProviderEnumerator {
    /// Provider identity for labels and snapshot keys.
    fn provider(&self) -> Provider;

    /// Tree model for the records this enumerator yields.
    fn hierarchy(&self) -> HierarchyModel;

    /// Fetch and normalize the next page; `None` once the provider reports no
    /// further continuation token. A fetch error aborts the whole scan.
    fn next_page(&mut self) -> Result<Option<Vec<FileRecord>>>;

    /// Display path of the folder containing `record`, degrading to
    /// [`ROOT_PATH`] when ancestry cannot be resolved.
    fn folder_path(&mut self, record: &FileRecord) -> String;

    /// Entries fetched from the provider so far.
    fn fetched(&self) -> u64;
}

/// Drive-style enumerator: records carry parent ids, paths require walking
/// the parent chain upward.
///
/// Folder records seen in the listing seed a per-scan `id → metadata` memo;
/// ancestors missing from it (shared items, folders owned elsewhere) cost one
/// `entry_metadata` lookup each and are memoized for the rest of the scan.
/// Resolved folder paths are memoized separately so sibling files never
/// re-walk a chain.
pub struct ParentGraphEnumerator<S> {
    source: S,
    provider: Provider,
    token: Option<String>,
    exhausted: bool,
    fetched: u64,
    folders: HashMap<String, FolderMetadata>,
    resolved_paths: HashMap<String, String>,
}

impl<S: ParentGraphSource> ParentGraphEnumerator<S> {
    #[must_use]
    pub fn new(source: S, provider: Provider) -> Self {
        Self {
            source,
            provider,
            token: None,
            exhausted: false,
            fetched: 0,
            folders: HashMap::new(),
            resolved_paths: HashMap::new(),
        }
    }

    /// Metadata for a folder id: memo hit, or one remote lookup (memoized).
    fn lookup_folder(&mut self, id: &str) -> Result<FolderMetadata> {
        if let Some(meta) = self.folders.get(id) {
            return Ok(meta.clone());
        }
        let meta = self.source.entry_metadata(id)?;
        self.folders.insert(id.to_string(), meta.clone());
        Ok(meta)
    }

    /// Display path of the folder `id`, walking the parent chain to the root.
    ///
    /// Any lookup failure (and any parent cycle) degrades to [`ROOT_PATH`];
    /// path resolution never fails a scan. The degraded result is memoized so
    /// the outcome is stable within one scan.
    fn resolve_folder_path(&mut self, id: &str) -> String {
        if let Some(path) = self.resolved_paths.get(id) {
            return path.clone();
        }

        let mut segments: Vec<String> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = Some(id.to_string());
        let path = loop {
            let Some(cur) = current else {
                // Walked past a parentless folder: chain is complete.
                segments.reverse();
                break format!("/{}", segments.join("/"));
            };
            if !visited.insert(cur.clone()) {
                break ROOT_PATH.to_string();
            }
            match self.lookup_folder(&cur) {
                Ok(meta) => {
                    segments.push(meta.name.clone());
                    current = meta.parent_ids.first().cloned();
                }
                Err(_) => break ROOT_PATH.to_string(),
            }
        };

        self.resolved_paths.insert(id.to_string(), path.clone());
        path
    }
}

impl<S: ParentGraphSource> ProviderEnumerator for ParentGraphEnumerator<S> {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn hierarchy(&self) -> HierarchyModel {
        HierarchyModel::ParentGraph
    }

    fn next_page(&mut self) -> Result<Option<Vec<FileRecord>>> {
        if self.exhausted {
            return Ok(None);
        }
        let page = self.source.list_page(self.token.as_deref())?;
        self.token = page.next_token;
        if self.token.is_none() {
            self.exhausted = true;
        }

        let mut records = Vec::with_capacity(page.entries.len());
        for entry in page.entries {
            self.fetched += 1;
            if entry.trashed {
                continue;
            }
            if entry.is_folder {
                self.folders.insert(
                    entry.id.clone(),
                    FolderMetadata {
                        name: entry.name.clone(),
                        parent_ids: entry.parent_ids.clone(),
                    },
                );
            }
            records.push(FileRecord::from(entry));
        }
        Ok(Some(records))
    }

    fn folder_path(&mut self, record: &FileRecord) -> String {
        match &record.locator {
            RecordLocator::ParentIds(parents) => parents.first().map_or_else(
                || ROOT_PATH.to_string(),
                |parent| {
                    let parent = parent.clone();
                    self.resolve_folder_path(&parent)
                },
            ),
            RecordLocator::FullPath(_) => ROOT_PATH.to_string(),
        }
    }

    fn fetched(&self) -> u64 {
        self.fetched
    }
}

/// Dropbox-style enumerator: records arrive with materialized paths, so
/// folder membership is a pure string operation with no remote lookups.
pub struct FlatPathEnumerator<S> {
    source: S,
    provider: Provider,
    cursor: Option<String>,
    exhausted: bool,
    fetched: u64,
}

impl<S: FlatPathSource> FlatPathEnumerator<S> {
    #[must_use]
    pub fn new(source: S, provider: Provider) -> Self {
        Self {
            source,
            provider,
            cursor: None,
            exhausted: false,
            fetched: 0,
        }
    }
}

impl<S: FlatPathSource> ProviderEnumerator for FlatPathEnumerator<S> {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn hierarchy(&self) -> HierarchyModel {
        HierarchyModel::FlatPath
    }

    fn next_page(&mut self) -> Result<Option<Vec<FileRecord>>> {
        if self.exhausted {
            return Ok(None);
        }
        let page = self.source.list_page(self.cursor.as_deref())?;
        self.cursor = page.next_cursor;
        if self.cursor.is_none() {
            self.exhausted = true;
        }
        self.fetched += page.entries.len() as u64;
        Ok(Some(page.entries.into_iter().map(FileRecord::from).collect()))
    }

    fn folder_path(&mut self, record: &FileRecord) -> String {
        record
            .full_path()
            .map_or_else(|| ROOT_PATH.to_string(), parent_of_path)
    }

    fn fetched(&self) -> u64 {
        self.fetched
    }
}

/// Containing-folder portion of a slash path: `/a/b/x.txt` → `/a/b`,
/// `/x.txt` → `/`.
fn parent_of_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) | None => ROOT_PATH.to_string(),
        Some(idx) => trimmed[..idx].to_string(),
    }
}
