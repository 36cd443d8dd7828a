//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use cloudsift::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{CsfError, Result};

// Rules
pub use crate::rules::catalog::Severity;
pub use crate::rules::classifier::{RiskMatch, RuleCatalog};

// Scan
pub use crate::scan::coordinator::run_scan;
pub use crate::scan::enumerator::{
    FlatPathEnumerator, HierarchyModel, ParentGraphEnumerator, ProviderEnumerator,
};
pub use crate::scan::progress::{NullObserver, ProgressObserver};
pub use crate::scan::record::{FileRecord, RecordLocator};
pub use crate::scan::result::{Finding, ScanResult, ScanSummary};
pub use crate::scan::source::{FlatPathSource, ParentGraphSource};
pub use crate::scan::tree::TreeNode;

// Providers
pub use crate::providers::Provider;
pub use crate::providers::fixture::{FixtureGraphSource, FixturePathSource};

// Cache
pub use crate::cache::SnapshotCache;

// Report
pub use crate::report::{ReportFormat, render, render_tree};
