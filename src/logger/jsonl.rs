//! JSONL event log: append-only line-delimited JSON for agent-friendly
//! consumption.
//!
//! Each line is a self-contained JSON object, assembled in memory and written
//! with a single `write_all` so a tailing process never sees a partial line.
//!
//! Degradation chain:
//! 1. Primary file path
//! 2. stderr with a `[CSIFT-JSONL]` prefix
//! 3. Silent discard (a scan must never fail because logging did)

#![allow(missing_docs)]

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Severity level for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
    Critical,
}

/// Event types matching the csift activity model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    ScanStart,
    ScanComplete,
    SnapshotSave,
    SnapshotLoad,
    CacheWriteFailure,
    Error,
}

/// A single JSONL log entry — all fields optional except `ts`, `event`, `level`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO 8601 UTC timestamp.
    pub ts: String,
    /// Event type identifier.
    pub event: EventType,
    /// Severity level.
    pub level: LogLevel,
    /// Provider label (when applicable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Entries fetched from the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched: Option<u64>,
    /// Records classified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned: Option<u64>,
    /// Flagged files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<u64>,
    /// Snapshot key involved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_key: Option<String>,
    /// CSF error code if the event records a failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Human-readable error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Freeform details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LogEntry {
    /// Create a new entry stamped with the current UTC time.
    #[must_use]
    pub fn new(event: EventType, level: LogLevel) -> Self {
        Self {
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            event,
            level,
            provider: None,
            fetched: None,
            scanned: None,
            findings: None,
            snapshot_key: None,
            error_code: None,
            error_message: None,
            details: None,
        }
    }

    #[must_use]
    pub fn provider(mut self, label: &str) -> Self {
        self.provider = Some(label.to_string());
        self
    }

    #[must_use]
    pub fn counts(mut self, fetched: u64, scanned: u64, findings: u64) -> Self {
        self.fetched = Some(fetched);
        self.scanned = Some(scanned);
        self.findings = Some(findings);
        self
    }

    #[must_use]
    pub fn error(mut self, code: &str, message: &str) -> Self {
        self.error_code = Some(code.to_string());
        self.error_message = Some(message.to_string());
        self
    }
}

/// Append-only JSONL writer with the file → stderr → discard chain.
#[derive(Debug)]
pub struct JsonlLogger {
    path: PathBuf,
}

impl JsonlLogger {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write one entry as a single line. Never fails; degrades instead.
    pub fn write_entry(&self, entry: &LogEntry) {
        let line = match serde_json::to_string(entry) {
            Ok(json) => format!("{json}\n"),
            Err(error) => {
                let _ = writeln!(io::stderr(), "[CSIFT-JSONL] serialize error: {error}");
                return;
            }
        };
        if self.append(&line).is_err() {
            let _ = write!(io::stderr(), "[CSIFT-JSONL] {line}");
        }
    }

    fn append(&self, line: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}
