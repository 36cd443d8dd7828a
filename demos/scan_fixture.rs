//! End-to-end demo: scan a small in-memory Dropbox-style listing and print
//! the findings table plus the reconstructed tree.
//!
//! ```sh
//! cargo run --example scan_fixture
//! ```

use chrono::{TimeZone, Utc};
use cloudsift::prelude::*;
use cloudsift::providers::fixture::{FixturePathSource, PathFixture};
use cloudsift::report::{ReportFormat, render, render_tree};
use cloudsift::scan::source::PathEntry;

fn entry(id: &str, path: &str, size: u64) -> PathEntry {
    PathEntry {
        id: id.to_string(),
        name: path.rsplit('/').next().unwrap().to_string(),
        is_folder: false,
        size: Some(size),
        modified: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        path: path.to_string(),
    }
}

fn main() -> Result<()> {
    let fixture = PathFixture {
        page_size: 3,
        entries: vec![
            entry("1", "/app/.env", 512),
            entry("2", "/app/config/settings.ini", 2_048),
            entry("3", "/backups/db-backup.sql", 4_194_304),
            entry("4", "/docs/notes.txt", 128),
            entry("5", "/keys/deploy.pem", 1_679),
            entry("6", "/personal/passport-scan.pdf", 902_400),
        ],
    };

    let catalog = RuleCatalog::builtin();
    let mut enumerator =
        FlatPathEnumerator::new(FixturePathSource::new(fixture), Provider::Dropbox);
    let result = run_scan(&mut enumerator, &catalog, &mut NullObserver)?;

    print!("{}", render(&result, ReportFormat::Table, true)?);
    println!();
    print!("{}", render_tree(&result.tree));
    Ok(())
}
