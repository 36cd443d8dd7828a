#![forbid(unsafe_code)]

//! cloudsift — inventories a cloud-storage account's filenames and flags
//! entries whose names suggest secret material, without reading contents.
//!
//! The engine is provider-agnostic: paginated enumeration and tree
//! reconstruction work over two structurally different listing models
//! (parent-id graphs and flat materialized paths) behind one interface, and
//! completed scans persist as per-provider snapshots for later reporting.
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use cloudsift::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use cloudsift::scan::coordinator::run_scan;
//! use cloudsift::rules::classifier::RuleCatalog;
//! ```

pub mod prelude;

pub mod cache;
pub mod core;
pub mod logger;
pub mod providers;
pub mod report;
pub mod rules;
pub mod scan;
