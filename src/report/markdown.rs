//! Markdown report renderer.

use crate::scan::result::ScanResult;

/// Render the scan result as a Markdown document.
#[must_use]
pub fn render_markdown(result: &ScanResult) -> String {
    let mut out = String::new();
    let summary = &result.summary;

    out.push_str("# Cloud storage filename audit\n\n");
    out.push_str(&format!("- **Provider:** {}\n", summary.provider_label));
    out.push_str(&format!(
        "- **Scanned:** {} records\n",
        summary.total_records_scanned
    ));
    out.push_str(&format!("- **Findings:** {}\n", summary.finding_count));
    out.push_str(&format!(
        "- **Scanned at:** {}\n\n",
        summary.scan_timestamp.to_rfc3339()
    ));

    if result.findings.is_empty() {
        out.push_str("No suspicious filenames found.\n");
        return out;
    }

    out.push_str("| Severity | Name | Folder | Categories |\n");
    out.push_str("|----------|------|--------|------------|\n");
    for finding in &result.findings {
        let categories: Vec<&str> = finding
            .risks
            .iter()
            .map(|risk| risk.category.as_str())
            .collect();
        out.push_str(&format!(
            "| {} | `{}` | `{}` | {} |\n",
            finding.max_severity().label(),
            escape_cell(&finding.record.name),
            escape_cell(&finding.folder_path),
            categories.join("; "),
        ));
    }
    out
}

fn escape_cell(field: &str) -> String {
    field.replace('|', "\\|")
}
