//! CSF-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, CsfError>;

/// Top-level error type for cloudsift.
#[derive(Debug, Error)]
pub enum CsfError {
    #[error("[CSF-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[CSF-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[CSF-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[CSF-1004] invalid risk rule {category:?}: {details}")]
    InvalidRule { category: String, details: String },

    #[error("[CSF-2001] transport failure for {provider}: {details}")]
    Transport { provider: String, details: String },

    #[error("[CSF-2002] fixture failure at {path}: {details}")]
    Fixture { path: PathBuf, details: String },

    #[error("[CSF-2101] no usable snapshot for provider {key:?}")]
    SnapshotMiss { key: String },

    #[error("[CSF-2102] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[CSF-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CsfError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "CSF-1001",
            Self::MissingConfig { .. } => "CSF-1002",
            Self::ConfigParse { .. } => "CSF-1003",
            Self::InvalidRule { .. } => "CSF-1004",
            Self::Transport { .. } => "CSF-2001",
            Self::Fixture { .. } => "CSF-2002",
            Self::SnapshotMiss { .. } => "CSF-2101",
            Self::Serialization { .. } => "CSF-2102",
            Self::Io { .. } => "CSF-3002",
        }
    }

    /// Whether this error means "no cached snapshot" rather than a real fault.
    ///
    /// Callers treat a snapshot miss as an instruction to run a live scan,
    /// never as a fatal condition.
    #[must_use]
    pub const fn is_snapshot_miss(&self) -> bool {
        matches!(self, Self::SnapshotMiss { .. })
    }

    /// Whether the scan as a whole must abort when this error surfaces.
    #[must_use]
    pub const fn is_fatal_to_scan(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Fixture { .. })
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for CsfError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for CsfError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
