//! Progress observation: purely informational counter updates during a scan.

use crate::rules::catalog::Severity;

/// Receives `(fetched, scanned, findings)` counter updates while a scan runs.
///
/// Updates arrive after every page and, within a page, after every
/// [`crate::scan::coordinator::RECORDS_PER_TICK`] records. Observers must not
/// influence scan outcome; they exist for console progress and logging only.
pub trait ProgressObserver {
    /// Counter update. `fetched` counts entries received from the provider,
    /// `scanned` counts records classified, `findings` counts flagged files.
    fn on_progress(&mut self, fetched: u64, scanned: u64, findings: u64);

    /// A finding was just recorded. Default implementation ignores it.
    fn on_finding(&mut self, _name: &str, _max_severity: Severity) {}
}

/// Observer that discards all updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl ProgressObserver for NullObserver {
    fn on_progress(&mut self, _fetched: u64, _scanned: u64, _findings: u64) {}
}
