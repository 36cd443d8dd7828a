//! Tree reconstruction from a flat record set, for both hierarchy models.
//!
//! Builders are pure functions of the complete record set: no network calls,
//! and identical input yields an identical tree. Children live in a `BTreeMap`
//! keyed by name, so structure is stable regardless of insertion order.
//!
//! Name collisions inside one folder are resolved by deterministic numeric
//! suffixing (`name (2)`, `name (3)`, …) in record-arrival order; no record is
//! ever silently dropped, including records with unresolvable parents, which
//! attach to the root instead.

#![allow(missing_docs)]

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scan::record::FileRecord;

/// Id of the synthetic root folder.
pub const ROOT_ID: &str = "root";

/// One node of the reconstructed hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Folder {
        name: String,
        id: String,
        children: BTreeMap<String, TreeNode>,
    },
    File {
        name: String,
        id: String,
        size: Option<u64>,
        modified: DateTime<Utc>,
    },
}

impl TreeNode {
    /// Synthetic root folder.
    #[must_use]
    pub fn root() -> Self {
        Self::Folder {
            name: String::new(),
            id: ROOT_ID.to_string(),
            children: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Folder { name, .. } | Self::File { name, .. } => name,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Folder { id, .. } | Self::File { id, .. } => id,
        }
    }

    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self, Self::Folder { .. })
    }

    /// Children map of a folder; `None` for files.
    #[must_use]
    pub const fn children(&self) -> Option<&BTreeMap<String, TreeNode>> {
        match self {
            Self::Folder { children, .. } => Some(children),
            Self::File { .. } => None,
        }
    }

    /// Total node count including this node.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::File { .. } => 1,
            Self::Folder { children, .. } => {
                1 + children.values().map(TreeNode::node_count).sum::<usize>()
            }
        }
    }

    /// Count of file nodes in this subtree.
    #[must_use]
    pub fn file_count(&self) -> usize {
        match self {
            Self::File { .. } => 1,
            Self::Folder { children, .. } => {
                children.values().map(TreeNode::file_count).sum::<usize>()
            }
        }
    }

    fn leaf(record: &FileRecord) -> Self {
        Self::File {
            name: record.name.clone(),
            id: record.id.clone(),
            size: record.size,
            modified: record.modified,
        }
    }
}

/// Insert under a collision-free key: the record name itself, or the first
/// free `name (n)` for n >= 2. Returns the key used.
fn insert_child(children: &mut BTreeMap<String, TreeNode>, name: &str, node: TreeNode) -> String {
    if !children.contains_key(name) {
        children.insert(name.to_string(), node);
        return name.to_string();
    }
    let mut n = 2usize;
    loop {
        let candidate = format!("{name} ({n})");
        if !children.contains_key(&candidate) {
            children.insert(candidate.clone(), node);
            return candidate;
        }
        n += 1;
    }
}

/// Build a tree from parent-graph records (Drive-style).
///
/// Two passes: folders are indexed by id first, then every record attaches
/// under its primary parent. A record whose parent id is absent from the
/// folder index (shared or unreachable parents) attaches to the root, as does
/// any folder trapped in a parent cycle.
#[must_use]
pub fn build_parent_graph_tree(records: &[FileRecord]) -> TreeNode {
    // Pass 1: index folder records by id.
    let folder_ids: HashSet<&str> = records
        .iter()
        .filter(|r| r.is_folder)
        .map(|r| r.id.as_str())
        .collect();

    // Group records by effective parent: a known folder id, or root.
    let mut children_of: HashMap<Option<&str>, Vec<&FileRecord>> = HashMap::new();
    for record in records {
        let parent = record
            .primary_parent()
            .filter(|p| folder_ids.contains(p) && *p != record.id);
        children_of.entry(parent).or_default().push(record);
    }

    // Pass 2: attach depth-first from the root.
    let mut attached: HashSet<&str> = HashSet::new();
    let mut root_children = attach_children(None, &children_of, &mut attached);

    // Cycle fallback: folders never reached from the root attach directly to
    // it, bringing their subtrees along.
    for record in records {
        if record.is_folder && !attached.contains(record.id.as_str()) {
            attached.insert(record.id.as_str());
            let node = TreeNode::Folder {
                name: record.name.clone(),
                id: record.id.clone(),
                children: attach_children(Some(record.id.as_str()), &children_of, &mut attached),
            };
            insert_child(&mut root_children, &record.name, node);
        }
    }

    TreeNode::Folder {
        name: String::new(),
        id: ROOT_ID.to_string(),
        children: root_children,
    }
}

fn attach_children<'a>(
    parent: Option<&'a str>,
    children_of: &HashMap<Option<&'a str>, Vec<&'a FileRecord>>,
    attached: &mut HashSet<&'a str>,
) -> BTreeMap<String, TreeNode> {
    let mut map = BTreeMap::new();
    let Some(records) = children_of.get(&parent) else {
        return map;
    };
    for record in records {
        if record.is_folder {
            if !attached.insert(record.id.as_str()) {
                continue;
            }
            let node = TreeNode::Folder {
                name: record.name.clone(),
                id: record.id.clone(),
                children: attach_children(Some(record.id.as_str()), children_of, attached),
            };
            insert_child(&mut map, &record.name, node);
        } else {
            insert_child(&mut map, &record.name, TreeNode::leaf(record));
        }
    }
    map
}

/// Build a tree from flat-path records (Dropbox-style).
///
/// Each path is split into segments; intermediate folders are created with
/// synthetic ids derived from their path, and adopt the real id if a folder
/// record for the same path arrives later.
#[must_use]
pub fn build_flat_path_tree(records: &[FileRecord]) -> TreeNode {
    let mut root_children = BTreeMap::new();

    for record in records {
        let Some(path) = record.full_path() else {
            // Locator mismatch: still never drop the record.
            insert_child(&mut root_children, &record.name, TreeNode::leaf(record));
            continue;
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((last, intermediates)) = segments.split_last() else {
            // A record for the root itself; the synthetic root already exists.
            continue;
        };

        let mut children = &mut root_children;
        let mut walked = String::new();
        for segment in intermediates {
            walked.push('/');
            walked.push_str(segment);
            children = descend_into_folder(children, segment, &walked);
        }

        if record.is_folder {
            attach_folder_record(children, last, record);
        } else {
            insert_child(children, last, TreeNode::leaf(record));
        }
    }

    TreeNode::Folder {
        name: String::new(),
        id: ROOT_ID.to_string(),
        children: root_children,
    }
}

fn synthetic_id(walked_path: &str) -> String {
    format!("path:{walked_path}")
}

/// Get-or-create the folder child `name`, returning its children map.
///
/// If the existing child under `name` is a file, the folder is placed under
/// the first free suffixed key instead, keeping both records reachable.
fn descend_into_folder<'a>(
    children: &'a mut BTreeMap<String, TreeNode>,
    name: &str,
    walked_path: &str,
) -> &'a mut BTreeMap<String, TreeNode> {
    let key = folder_key(children, name);
    let node = children.entry(key).or_insert_with(|| TreeNode::Folder {
        name: name.to_string(),
        id: synthetic_id(walked_path),
        children: BTreeMap::new(),
    });
    match node {
        TreeNode::Folder { children, .. } => children,
        TreeNode::File { .. } => unreachable!("folder_key returns a folder or vacant key"),
    }
}

/// Key under which a folder named `name` lives or may be inserted: the first
/// of `name`, `name (2)`, … that is either vacant or already a folder.
fn folder_key(children: &BTreeMap<String, TreeNode>, name: &str) -> String {
    let mut candidate = name.to_string();
    let mut n = 2usize;
    while matches!(children.get(&candidate), Some(TreeNode::File { .. })) {
        candidate = format!("{name} ({n})");
        n += 1;
    }
    candidate
}

/// Attach a folder record at its final path segment.
///
/// An implicitly created folder (synthetic id) at the same key adopts the
/// record's real id and keeps its children; a real-id folder already present
/// means two folder records collide, and the newcomer is suffixed.
fn attach_folder_record(children: &mut BTreeMap<String, TreeNode>, name: &str, record: &FileRecord) {
    let key = folder_key(children, name);
    let implicit = matches!(
        children.get(&key),
        Some(TreeNode::Folder { id, .. }) if id.starts_with("path:")
    );
    if implicit {
        if let Some(TreeNode::Folder { id, .. }) = children.get_mut(&key) {
            record.id.clone_into(id);
        }
        return;
    }

    let node = TreeNode::Folder {
        name: record.name.clone(),
        id: record.id.clone(),
        children: BTreeMap::new(),
    };
    if children.contains_key(&key) {
        // Two explicit folder records collide on this name; suffix the newcomer.
        insert_child(children, &key, node);
    } else {
        children.insert(key, node);
    }
}
