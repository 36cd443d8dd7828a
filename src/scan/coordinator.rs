//! Scan coordination: enumerate → classify → build tree → order findings.

use chrono::Utc;

use crate::core::errors::Result;
use crate::rules::classifier::RuleCatalog;
use crate::scan::enumerator::{HierarchyModel, ProviderEnumerator};
use crate::scan::progress::ProgressObserver;
use crate::scan::result::{Finding, ScanResult, ScanSummary, sort_findings};
use crate::scan::tree::{build_flat_path_tree, build_parent_graph_tree};

/// In-page progress cadence: observers hear from us after every page and
/// after this many records within a page.
pub const RECORDS_PER_TICK: usize = 10;

/// Run one full scan against the given enumerator.
///
/// Drives pagination to completion, classifying every record as it arrives
/// (folders place into the tree but never classify). After enumeration the
/// tree is built once over the full record set and findings are ordered by
/// descending maximum severity; the sort is stable, so findings of equal
/// severity keep their discovery order and two scans over an unchanged
/// listing produce identical output apart from the timestamp.
///
/// Any page-fetch error aborts the scan with no partial result.
pub fn run_scan(
    enumerator: &mut dyn ProviderEnumerator,
    catalog: &RuleCatalog,
    observer: &mut dyn ProgressObserver,
) -> Result<ScanResult> {
    let mut records = Vec::new();
    let mut findings: Vec<Finding> = Vec::new();
    let mut scanned: u64 = 0;

    while let Some(page) = enumerator.next_page()? {
        for (index, record) in page.into_iter().enumerate() {
            scanned += 1;
            let risks = catalog.classify(&record);
            if !risks.is_empty() {
                let folder_path = enumerator.folder_path(&record);
                let finding = Finding {
                    record: record.clone(),
                    risks,
                    folder_path,
                };
                observer.on_finding(&finding.record.name, finding.max_severity());
                findings.push(finding);
            }
            records.push(record);

            if (index + 1) % RECORDS_PER_TICK == 0 {
                observer.on_progress(enumerator.fetched(), scanned, findings.len() as u64);
            }
        }
        observer.on_progress(enumerator.fetched(), scanned, findings.len() as u64);
    }

    let tree = match enumerator.hierarchy() {
        HierarchyModel::ParentGraph => build_parent_graph_tree(&records),
        HierarchyModel::FlatPath => build_flat_path_tree(&records),
    };

    sort_findings(&mut findings);

    let summary = ScanSummary {
        total_records_scanned: scanned,
        finding_count: findings.len() as u64,
        scan_timestamp: Utc::now(),
        provider_label: enumerator.provider().label().to_string(),
    };

    Ok(ScanResult {
        findings,
        tree,
        summary,
    })
}
