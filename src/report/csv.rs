//! CSV export: one row per (finding, matched rule).

use crate::scan::result::ScanResult;

/// Render the scan result as CSV with a commented summary header.
#[must_use]
pub fn render_csv(result: &ScanResult) -> String {
    let mut out = String::new();
    let summary = &result.summary;

    out.push_str(&format!("# provider: {}\n", summary.provider_label));
    out.push_str(&format!("# scanned_at: {}\n", summary.scan_timestamp.to_rfc3339()));
    out.push_str(&format!(
        "# records_scanned: {}\n# findings: {}\n",
        summary.total_records_scanned, summary.finding_count
    ));

    out.push_str("severity,category,name,folder,size_bytes,modified,description\n");
    for finding in &result.findings {
        for risk in &finding.risks {
            out.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                risk.severity.label(),
                escape(&risk.category),
                escape(&finding.record.name),
                escape(&finding.folder_path),
                finding
                    .record
                    .size
                    .map_or_else(String::new, |s| s.to_string()),
                finding.record.modified.to_rfc3339(),
                escape(&risk.description),
            ));
        }
    }
    out
}

/// Quote a field when it contains separators, quotes, or newlines.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
