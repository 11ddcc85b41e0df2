//! Output rendering for validation reports.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-issue fields and a top-level summary.

use crate::engine::Progress;
use crate::models::{Category, ValidationReport};
use owo_colors::OwoColorize;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print a validation report in the requested format.
pub fn print_report(report: &ValidationReport, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_report_json(report)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for issue in &report.issues {
                let tag = format!("⟦{}⟧", issue.category);
                let tag = if color {
                    match issue.category {
                        Category::Price => tag.red().bold().to_string(),
                        Category::Inventory => tag.yellow().bold().to_string(),
                        Category::Image => tag.magenta().bold().to_string(),
                        Category::Html => tag.cyan().bold().to_string(),
                        Category::VariantOrder => tag.blue().bold().to_string(),
                        Category::Other => tag.bold().to_string(),
                    }
                } else {
                    tag
                };
                let sku = if color {
                    issue.sku.clone().bold().to_string()
                } else {
                    issue.sku.clone()
                };
                println!("✖ {} {} — {}", tag, sku, issue.message);
            }
            let categories = report
                .summary
                .categories
                .iter()
                .map(|(category, count)| format!("{category}={count}"))
                .collect::<Vec<_>>();
            let breakdown = if categories.is_empty() {
                String::new()
            } else {
                format!(" [{}]", categories.join(", "))
            };
            let summary = format!(
                "— Summary — issues={} rows={}{}",
                report.summary.total, report.summary.rows, breakdown
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &ValidationReport) -> JsonVal {
    // Directly serialize the report, keeping a stable shape
    serde_json::to_value(report).unwrap()
}

/// Console progress sink: one stderr line per processed row.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn on_row(&self, index: usize, total: usize, status: &str) {
        eprintln!(
            "{} ({}/{}) {}",
            crate::utils::info_prefix(),
            index + 1,
            total,
            status
        );
    }
}
