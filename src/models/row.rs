//! Typed catalog row and metafield column mapping.
//!
//! Rows arrive from the export with a fixed set of named columns plus an
//! open tail of metafield columns. The named fields are resolved once at
//! ingestion; everything else lands in `metafields` keyed by header.

use std::collections::HashMap;

/// Default export header for the trader-price metafield.
pub const TRADER_PRICE_COLUMN: &str =
    "Variant Metafield:product.trader-price [single_line_text_field]";
/// Default export header for the dealer-price metafield.
pub const DEALER_PRICE_COLUMN: &str =
    "Variant Metafield:product.dealer-price [single_line_text_field]";

#[derive(Debug, Clone, Default)]
/// One product variant row from the catalog export.
///
/// Optional fields hold `None` when the cell was absent or blank, so rule
/// code never needs to re-check for whitespace-only values.
pub struct CatalogRow {
    pub sku: String,
    pub title: String,
    /// Parsed `Variant Position`; `None` when blank or unparseable.
    pub position: Option<i64>,
    pub price: Option<String>,
    pub cost: Option<String>,
    pub inventory_qty: Option<String>,
    pub image_src: Option<String>,
    pub body_html: Option<String>,
    /// Columns not mapped to a named field, keyed by header.
    pub metafields: HashMap<String, String>,
}

impl CatalogRow {
    /// Look up a metafield by header, treating blank values as absent.
    pub fn metafield(&self, column: &str) -> Option<&str> {
        self.metafields
            .get(column)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

#[derive(Debug, Clone)]
/// Resolved metafield headers; overridable via `[columns]` in the config.
pub struct ColumnMap {
    pub trader_price: String,
    pub dealer_price: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        ColumnMap {
            trader_price: TRADER_PRICE_COLUMN.to_string(),
            dealer_price: DEALER_PRICE_COLUMN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metafield_blank_is_absent() {
        let mut row = CatalogRow::default();
        row.metafields
            .insert("custom".to_string(), "  ".to_string());
        row.metafields.insert("set".to_string(), "42".to_string());
        assert_eq!(row.metafield("custom"), None);
        assert_eq!(row.metafield("set"), Some("42"));
        assert_eq!(row.metafield("missing"), None);
    }
}
