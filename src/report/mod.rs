//! Report rendering: pure functions from a `ScanResult` to output text.

#![allow(missing_docs)]

mod csv;
mod markdown;
mod table;

use std::str::FromStr;

use crate::core::errors::Result;
use crate::scan::result::ScanResult;
use crate::scan::tree::TreeNode;

pub use csv::render_csv;
pub use markdown::render_markdown;
pub use table::render_table;

/// Output formats for scan reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl ReportFormat {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Markdown => "markdown",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!(
                "unknown report format {other:?} (expected table, json, csv, or markdown)"
            )),
        }
    }
}

/// Render a scan result in the requested format.
///
/// `color` only affects the console table; structured formats stay plain.
pub fn render(result: &ScanResult, format: ReportFormat, color: bool) -> Result<String> {
    match format {
        ReportFormat::Table => Ok(render_table(result, color)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        ReportFormat::Csv => Ok(render_csv(result)),
        ReportFormat::Markdown => Ok(render_markdown(result)),
    }
}

/// Render the folder hierarchy as an indented ASCII tree.
#[must_use]
pub fn render_tree(tree: &TreeNode) -> String {
    let mut out = String::from("/\n");
    if let Some(children) = tree.children() {
        let last_index = children.len().saturating_sub(1);
        for (index, node) in children.values().enumerate() {
            render_node(node, "", index == last_index, &mut out);
        }
    }
    out
}

fn render_node(node: &TreeNode, prefix: &str, is_last: bool, out: &mut String) {
    let connector = if is_last { "└── " } else { "├── " };
    out.push_str(prefix);
    out.push_str(connector);
    out.push_str(node.name());
    if node.is_folder() {
        out.push('/');
    }
    out.push('\n');

    if let Some(children) = node.children() {
        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let last_index = children.len().saturating_sub(1);
        for (index, child) in children.values().enumerate() {
            render_node(child, &child_prefix, index == last_index, out);
        }
    }
}
