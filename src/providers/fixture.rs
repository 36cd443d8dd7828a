//! Fixture-backed listing sources: canned account listings served through the
//! real source traits, page by page.
//!
//! Fixtures stand in for live provider integrations in demos and tests. The
//! continuation token is a numeric offset, which keeps scripted pagination
//! deterministic and lets tests exercise multi-page scans without a network.

#![allow(missing_docs)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::errors::{CsfError, Result};
use crate::scan::source::{
    FlatPathSource, FolderMetadata, GraphEntry, GraphPage, ParentGraphSource, PathEntry, PathPage,
};

const fn default_page_size() -> usize {
    100
}

/// Canned parent-graph account listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphFixture {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    pub entries: Vec<GraphEntry>,
    /// Ancestors resolvable by id lookup but absent from the listing itself
    /// (shared folders, items owned by other accounts).
    #[serde(default)]
    pub folder_metadata: HashMap<String, FolderMetadata>,
}

/// Parent-graph listing source over a [`GraphFixture`].
#[derive(Debug, Clone)]
pub struct FixtureGraphSource {
    fixture: GraphFixture,
}

impl FixtureGraphSource {
    #[must_use]
    pub fn new(fixture: GraphFixture) -> Self {
        Self { fixture }
    }

    /// Load a fixture from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| CsfError::io(path, source))?;
        let fixture: GraphFixture =
            serde_json::from_str(&raw).map_err(|error| CsfError::Fixture {
                path: path.to_path_buf(),
                details: error.to_string(),
            })?;
        Ok(Self::new(fixture))
    }
}

impl ParentGraphSource for FixtureGraphSource {
    fn list_page(&mut self, token: Option<&str>) -> Result<GraphPage> {
        let (entries, next) = slice_page(
            &self.fixture.entries,
            self.fixture.page_size,
            token,
            "google_drive",
        )?;
        Ok(GraphPage {
            entries,
            next_token: next,
        })
    }

    fn entry_metadata(&mut self, id: &str) -> Result<FolderMetadata> {
        if let Some(meta) = self.fixture.folder_metadata.get(id) {
            return Ok(meta.clone());
        }
        self.fixture
            .entries
            .iter()
            .find(|entry| entry.is_folder && entry.id == id)
            .map(|entry| FolderMetadata {
                name: entry.name.clone(),
                parent_ids: entry.parent_ids.clone(),
            })
            .ok_or_else(|| CsfError::Transport {
                provider: "google_drive".to_string(),
                details: format!("no metadata for id {id:?}"),
            })
    }
}

/// Canned flat-path account listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathFixture {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    pub entries: Vec<PathEntry>,
}

/// Flat-path listing source over a [`PathFixture`].
#[derive(Debug, Clone)]
pub struct FixturePathSource {
    fixture: PathFixture,
}

impl FixturePathSource {
    #[must_use]
    pub fn new(fixture: PathFixture) -> Self {
        Self { fixture }
    }

    /// Load a fixture from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| CsfError::io(path, source))?;
        let fixture: PathFixture =
            serde_json::from_str(&raw).map_err(|error| CsfError::Fixture {
                path: path.to_path_buf(),
                details: error.to_string(),
            })?;
        Ok(Self::new(fixture))
    }
}

impl FlatPathSource for FixturePathSource {
    fn list_page(&mut self, cursor: Option<&str>) -> Result<PathPage> {
        let (entries, next) = slice_page(
            &self.fixture.entries,
            self.fixture.page_size,
            cursor,
            "dropbox",
        )?;
        Ok(PathPage {
            entries,
            next_cursor: next,
        })
    }
}

/// Slice one page out of the full entry list; the token is a numeric offset.
fn slice_page<T: Clone>(
    entries: &[T],
    page_size: usize,
    token: Option<&str>,
    provider: &str,
) -> Result<(Vec<T>, Option<String>)> {
    let offset = match token {
        None => 0,
        Some(raw) => raw.parse::<usize>().map_err(|_| CsfError::Transport {
            provider: provider.to_string(),
            details: format!("malformed continuation token {raw:?}"),
        })?,
    };
    let page_size = page_size.max(1);
    let end = offset.saturating_add(page_size).min(entries.len());
    let page = entries.get(offset..end).unwrap_or_default().to_vec();
    let next = (end < entries.len()).then(|| end.to_string());
    Ok((page, next))
}
