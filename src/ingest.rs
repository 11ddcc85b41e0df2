//! CSV ingestion: catalog export to typed rows, with fatal pre-checks.
//!
//! An empty dataset or missing required columns aborts the run before any
//! row-level validation; everything past this point is an `Issue`, never an
//! abort.

use crate::models::row::CatalogRow;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Columns every catalog export must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Variant SKU",
    "Title",
    "Variant Position",
    "Variant Price",
    "Variant Cost",
];

#[derive(Debug, Error)]
/// Fatal conditions that abort a run before any row is validated.
pub enum IngestError {
    #[error("failed to read catalog: {0}")]
    Csv(#[from] csv::Error),
    #[error("the catalog file is empty")]
    EmptyDataset,
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Load catalog rows from a CSV export.
pub fn load_rows(path: &Path) -> Result<Vec<CatalogRow>, IngestError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut rows: Vec<CatalogRow> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut cells: HashMap<String, String> = HashMap::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            cells.insert(header.to_string(), value.to_string());
        }
        rows.push(row_from_cells(cells));
    }
    if rows.is_empty() {
        return Err(IngestError::EmptyDataset);
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !headers.iter().any(|h| h == **c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns(missing));
    }
    Ok(rows)
}

fn row_from_cells(mut cells: HashMap<String, String>) -> CatalogRow {
    fn optional(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.trim().is_empty())
    }
    // Exports sometimes carry positions as "2.0"; accept integral floats.
    fn parse_position(value: Option<String>) -> Option<i64> {
        let raw = optional(value)?;
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.fract() == 0.0)
            .map(|v| v as i64)
    }

    let sku = cells.remove("Variant SKU").unwrap_or_default();
    let title = cells.remove("Title").unwrap_or_default();
    let position = parse_position(cells.remove("Variant Position"));
    let price = optional(cells.remove("Variant Price"));
    let cost = optional(cells.remove("Variant Cost"));
    let inventory_qty = optional(cells.remove("Variant Inventory Qty"));
    let image_src = optional(cells.remove("Image Src"));
    let body_html = optional(cells.remove("Body HTML"));
    CatalogRow {
        sku,
        title,
        position,
        price,
        cost,
        inventory_qty,
        image_src,
        body_html,
        metafields: cells,
    }
}
