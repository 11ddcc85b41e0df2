//! Cross-row variant ordering rules within a base-title group.
//!
//! Rows are grouped by their title with the trailing variant number
//! stripped. Position sequencing and title numbering are independent
//! checks; both run even when the other already flagged the group.

use crate::models::row::CatalogRow;
use crate::models::{Category, Issue};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+\d+$").expect("title suffix pattern"))
}

/// Strip the trailing whitespace+digits variant suffix from a title.
pub fn base_title(title: &str) -> String {
    suffix_re().replace(title, "").to_string()
}

/// Validate variant positions and title numbering across the full row set.
///
/// Groups are visited in sorted base-title order so the emitted issue
/// sequence is deterministic. Single-row groups are exempt.
pub fn validate_variant_order(rows: &[CatalogRow]) -> Vec<Issue> {
    let mut groups: BTreeMap<String, Vec<&CatalogRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(base_title(&row.title)).or_default().push(row);
    }

    let mut issues: Vec<Issue> = Vec::new();
    for (base, group) in groups {
        if group.len() < 2 {
            continue;
        }
        let mut by_position = group;
        // Rows without a parseable position sort last and are excluded from
        // the actual sequence, which necessarily fails the 1..N check.
        by_position.sort_by_key(|r| r.position.unwrap_or(i64::MAX));

        let actual: Vec<i64> = by_position.iter().filter_map(|r| r.position).collect();
        let expected: Vec<i64> = (1..=by_position.len() as i64).collect();
        let mut actual_sorted = actual.clone();
        actual_sorted.sort_unstable();
        if actual_sorted != expected {
            for row in &by_position {
                issues.push(Issue {
                    sku: row.sku.clone(),
                    category: Category::VariantOrder,
                    message: format!(
                        "Incorrect position sequence. Expected {expected:?}, got {actual:?}"
                    ),
                });
            }
        }

        for (i, row) in by_position.iter().enumerate() {
            let n = i + 1;
            let want = if n == 1 {
                base.clone()
            } else {
                format!("{base} {n}")
            };
            if row.title != want {
                issues.push(Issue {
                    sku: row.sku.clone(),
                    category: Category::VariantOrder,
                    message: format!(
                        "Incorrect title format. Expected \"{want}\", got \"{}\"",
                        row.title
                    ),
                });
            }
        }
    }
    issues
}
