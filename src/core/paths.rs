//! Default filesystem locations for config, snapshots, and the event log.

use std::env;
use std::path::PathBuf;

/// Home directory, with a /tmp fallback when HOME is unset.
#[must_use]
pub fn home_dir() -> PathBuf {
    env::var_os("HOME").map_or_else(
        || {
            eprintln!("[CSIFT-CONFIG] WARNING: HOME not set, falling back to /tmp for data paths");
            PathBuf::from("/tmp")
        },
        PathBuf::from,
    )
}

/// Default config file: `~/.config/csift/config.toml`.
#[must_use]
pub fn default_config_file() -> PathBuf {
    home_dir().join(".config").join("csift").join("config.toml")
}

/// Default data directory: `~/.local/share/csift`.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("csift")
}

/// Default snapshot cache directory.
#[must_use]
pub fn default_snapshot_dir() -> PathBuf {
    default_data_dir().join("snapshots")
}

/// Default JSONL event log path.
#[must_use]
pub fn default_jsonl_log() -> PathBuf {
    default_data_dir().join("activity.jsonl")
}
