//! Console table renderer.

#![allow(clippy::cast_precision_loss)]

use colored::Colorize;

use crate::rules::catalog::Severity;
use crate::scan::result::ScanResult;

/// Render the findings table with a summary header.
///
/// One row per finding; the primary (first-matched) category is shown, with a
/// `+n` marker when further rules matched. Severity cells are colored when
/// `color` is set.
#[must_use]
pub fn render_table(result: &ScanResult, color: bool) -> String {
    let mut out = String::new();
    let summary = &result.summary;

    out.push_str(&format!(
        "Provider: {}    Scanned: {}    Findings: {}\n",
        summary.provider_label, summary.total_records_scanned, summary.finding_count
    ));
    out.push_str(&format!(
        "Scanned at: {}\n\n",
        summary.scan_timestamp.to_rfc3339()
    ));

    if result.findings.is_empty() {
        out.push_str("No suspicious filenames found.\n");
        return out;
    }

    let mut rows: Vec<[String; 5]> = Vec::with_capacity(result.findings.len());
    for finding in &result.findings {
        let category = finding.risks.first().map_or_else(String::new, |risk| {
            if finding.risks.len() > 1 {
                format!("{} (+{})", risk.category, finding.risks.len() - 1)
            } else {
                risk.category.clone()
            }
        });
        rows.push([
            finding.max_severity().label().to_string(),
            finding.record.name.clone(),
            finding.folder_path.clone(),
            category,
            finding.record.size.map_or_else(String::new, human_size),
        ]);
    }

    let headers = ["SEVERITY", "NAME", "FOLDER", "CATEGORY", "SIZE"];
    let mut widths: [usize; 5] = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    for (index, header) in headers.iter().enumerate() {
        out.push_str(&format!("{:<width$}  ", header, width = widths[index]));
    }
    out.push('\n');
    for (index, _) in headers.iter().enumerate() {
        out.push_str(&"-".repeat(widths[index]));
        out.push_str("  ");
    }
    out.push('\n');

    for (row, finding) in rows.iter().zip(&result.findings) {
        let severity_cell = format!("{:<width$}", row[0], width = widths[0]);
        let severity_cell = if color {
            paint(&severity_cell, finding.max_severity())
        } else {
            severity_cell
        };
        out.push_str(&severity_cell);
        out.push_str("  ");
        for index in 1..headers.len() {
            out.push_str(&format!("{:<width$}  ", row[index], width = widths[index]));
        }
        // Trailing alignment spaces add nothing to the last column.
        while out.ends_with(' ') {
            out.pop();
        }
        out.push('\n');
    }

    out
}

fn paint(cell: &str, severity: Severity) -> String {
    match severity {
        Severity::High => cell.red().bold().to_string(),
        Severity::Medium => cell.yellow().to_string(),
        Severity::Low => cell.blue().to_string(),
    }
}

/// Human-readable byte size: `512 B`, `1.0 MiB`.
#[must_use]
pub fn human_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
