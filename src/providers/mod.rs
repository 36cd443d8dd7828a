//! Provider identities and the fixture-backed listing sources.

#![allow(missing_docs)]

pub mod fixture;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::scan::enumerator::HierarchyModel;

/// Supported storage providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    GoogleDrive,
    Dropbox,
}

impl Provider {
    /// Stable key used for snapshot files and summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GoogleDrive => "google_drive",
            Self::Dropbox => "dropbox",
        }
    }

    /// Human-readable name for reports.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::GoogleDrive => "Google Drive",
            Self::Dropbox => "Dropbox",
        }
    }

    /// Which hierarchy model this provider's listings use.
    #[must_use]
    pub const fn hierarchy(self) -> HierarchyModel {
        match self {
            Self::GoogleDrive => HierarchyModel::ParentGraph,
            Self::Dropbox => HierarchyModel::FlatPath,
        }
    }

    /// All known providers, in stable order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::GoogleDrive, Self::Dropbox]
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "drive" | "google_drive" | "google-drive" | "gdrive" => Ok(Self::GoogleDrive),
            "dropbox" => Ok(Self::Dropbox),
            other => Err(format!(
                "unknown provider {other:?} (expected drive or dropbox)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(Provider::GoogleDrive.label(), "google_drive");
        assert_eq!(Provider::Dropbox.label(), "dropbox");
    }

    #[test]
    fn hierarchy_models_match_provider_listing_styles() {
        assert_eq!(
            Provider::GoogleDrive.hierarchy(),
            HierarchyModel::ParentGraph
        );
        assert_eq!(Provider::Dropbox.hierarchy(), HierarchyModel::FlatPath);
    }

    #[test]
    fn parses_common_spellings() {
        assert_eq!("drive".parse::<Provider>().unwrap(), Provider::GoogleDrive);
        assert_eq!(
            "Google-Drive".parse::<Provider>().unwrap(),
            Provider::GoogleDrive
        );
        assert_eq!("DROPBOX".parse::<Provider>().unwrap(), Provider::Dropbox);
        assert!("box".parse::<Provider>().is_err());
    }
}
