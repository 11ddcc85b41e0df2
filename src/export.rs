//! Report persistence: detail and summary CSVs with a timestamped name.
//!
//! Mirrors the two-part report shape consumers expect: a detail file with
//! one line per issue and a sibling summary file with per-category counts.

use crate::models::ValidationReport;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `validation_issues_{timestamp}.csv` plus a sibling
/// `..._summary.csv` under `dir`, returning both paths.
pub fn write_report(
    report: &ValidationReport,
    dir: &Path,
) -> Result<(PathBuf, PathBuf), csv::Error> {
    fs::create_dir_all(dir)?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let detail_path = dir.join(format!("validation_issues_{stamp}.csv"));
    let summary_path = dir.join(format!("validation_issues_{stamp}_summary.csv"));

    let mut detail = csv::Writer::from_path(&detail_path)?;
    detail.write_record(["Variant SKU", "Category", "Message"])?;
    for issue in &report.issues {
        detail.write_record([
            issue.sku.as_str(),
            issue.category.as_str(),
            issue.message.as_str(),
        ])?;
    }
    detail.flush()?;

    let mut summary = csv::Writer::from_path(&summary_path)?;
    summary.write_record(["Category", "Count"])?;
    for (category, count) in &report.summary.categories {
        summary.write_record([category.as_str(), count.to_string().as_str()])?;
    }
    summary.flush()?;

    Ok((detail_path, summary_path))
}
