//! Price hierarchy rule: retail, trader, dealer, and cost relationships.
//!
//! The expected ordering is Variant Price > Trader Price > Dealer Price >
//! Variant Cost, with an additional margin ceiling on the dealer price.
//! Individual rule failures accumulate; the rule fails as a whole only
//! after every applicable comparison has been evaluated.

use crate::checks::value::validate_price;
use crate::models::row::{CatalogRow, ColumnMap};
use crate::models::Outcome;

/// Validate the tiered price relationships for one row.
///
/// `Variant Price` and `Variant Cost` are required; a parse failure on
/// either fails the whole rule with that reason. Trader and dealer
/// metafields participate only when present and non-empty, but a present
/// value that does not parse also fails the rule.
pub fn validate_price_hierarchy(row: &CatalogRow, columns: &ColumnMap) -> Outcome<()> {
    let price = validate_price(row.price.as_deref())
        .map_err(|e| format!("Invalid Variant Price: {e}"))?;
    let cost = validate_price(row.cost.as_deref())
        .map_err(|e| format!("Invalid Variant Cost: {e}"))?;

    let trader = match row.metafield(&columns.trader_price) {
        Some(v) => {
            Some(validate_price(Some(v)).map_err(|e| format!("Invalid Trader Price: {e}"))?)
        }
        None => None,
    };
    let dealer = match row.metafield(&columns.dealer_price) {
        Some(v) => {
            Some(validate_price(Some(v)).map_err(|e| format!("Invalid Dealer Price: {e}"))?)
        }
        None => None,
    };

    let mut issues: Vec<String> = Vec::new();
    if let Some(trader) = trader {
        if price <= trader {
            issues.push("Variant Price must be greater than Trader Price".to_string());
        }
        if let Some(dealer) = dealer {
            if trader <= dealer {
                issues.push("Trader Price must be greater than Dealer Price".to_string());
            }
        }
    }
    if let Some(dealer) = dealer {
        if dealer <= cost {
            issues.push("Dealer Price must be greater than Variant Cost".to_string());
        }
        let ceiling = price / 1.2 * 0.9;
        if dealer > ceiling {
            issues.push(format!(
                "Dealer Price Issue: Not less than {ceiling:.2} (Variant Price/1.2*0.9)"
            ));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues.join("; "))
    }
}
