//! Scalar value validators for prices and inventory counts.

use crate::models::row::CatalogRow;
use crate::models::Outcome;

/// Validate a price or cost cell.
///
/// Strips a leading currency symbol and surrounding whitespace; the
/// remainder must parse as a strictly positive number. The parsed value is
/// returned for downstream rules.
pub fn validate_price(value: Option<&str>) -> Outcome<f64> {
    let raw = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return Err("Missing value".to_string()),
    };
    let cleaned = raw.strip_prefix('$').unwrap_or(raw).trim();
    match cleaned.parse::<f64>() {
        Ok(v) if v > 0.0 => Ok(v),
        Ok(_) => Err("Value must be greater than 0".to_string()),
        Err(_) => Err("Invalid numeric value".to_string()),
    }
}

/// Validate the inventory quantity; absent counts as zero.
pub fn validate_inventory(row: &CatalogRow) -> Outcome<()> {
    let raw = row
        .inventory_qty
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("0");
    let qty: f64 = raw
        .parse()
        .map_err(|_| "Invalid inventory quantity format".to_string())?;
    if qty < 0.0 {
        return Err(format!("Negative inventory quantity found: {qty}"));
    }
    Ok(())
}
