//! Report aggregation across group-level and row-level rules.
//!
//! Runs the variant-order pass over the full row set first, then fans the
//! independent row-level rules out with rayon. The index-preserving map
//! keeps the emitted issue sequence deterministic regardless of scheduling,
//! and a panic inside one row's evaluation becomes a single issue for that
//! row instead of aborting the rest.

use crate::checks::html::validate_html_content;
use crate::checks::order::validate_variant_order;
use crate::checks::price::validate_price_hierarchy;
use crate::checks::remote::{validate_image_urls, RemoteChecks};
use crate::checks::value::validate_inventory;
use crate::models::row::{CatalogRow, ColumnMap};
use crate::models::{Category, Issue, ValidationReport};
use rayon::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Observer invoked after each row finishes. Rows may complete out of
/// order when validation runs in parallel; implementations must tolerate
/// unordered calls.
pub trait Progress: Sync {
    fn on_row(&self, index: usize, total: usize, status: &str);
}

/// No-op progress sink.
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn on_row(&self, _index: usize, _total: usize, _status: &str) {}
}

/// Everything the rule engine needs besides the rows themselves.
pub struct Deps<'a> {
    pub remote: RemoteChecks<'a>,
    pub columns: ColumnMap,
}

/// Run the full rule set over a catalog and aggregate the report.
pub fn run_validation(
    rows: &[CatalogRow],
    deps: &Deps,
    progress: &dyn Progress,
) -> ValidationReport {
    let mut issues = validate_variant_order(rows);

    let total = rows.len();
    let per_row: Vec<Vec<Issue>> = rows
        .par_iter()
        .enumerate()
        .map(|(index, row)| {
            let found = catch_unwind(AssertUnwindSafe(|| validate_row(row, deps)))
                .unwrap_or_else(|_| {
                    vec![Issue {
                        sku: row.sku.clone(),
                        category: Category::Other,
                        message: "Unexpected validation failure while evaluating row rules"
                            .to_string(),
                    }]
                });
            progress.on_row(index, total, &format!("Processing SKU: {}", row.sku));
            found
        })
        .collect();
    issues.extend(per_row.into_iter().flatten());

    ValidationReport::new(issues, total)
}

/// Apply every row-level rule to one row.
fn validate_row(row: &CatalogRow, deps: &Deps) -> Vec<Issue> {
    let mut issues: Vec<Issue> = Vec::new();

    // Required-value pre-check. The row still goes through the rules so
    // pricing gaps surface with their own messages.
    let mut missing: Vec<&str> = Vec::new();
    if row.sku.trim().is_empty() {
        missing.push("Variant SKU");
    }
    if row.title.trim().is_empty() {
        missing.push("Title");
    }
    if row.position.is_none() {
        missing.push("Variant Position");
    }
    if !missing.is_empty() {
        issues.push(Issue {
            sku: row.sku.clone(),
            category: Category::Other,
            message: format!("Missing or invalid required value: {}", missing.join(", ")),
        });
    }

    if let Err(msg) = validate_inventory(row) {
        issues.push(Issue {
            sku: row.sku.clone(),
            category: Category::Inventory,
            message: format!("Inventory issue: {msg}"),
        });
    }
    if let Err(msg) = validate_price_hierarchy(row, &deps.columns) {
        issues.push(Issue {
            sku: row.sku.clone(),
            category: Category::Price,
            message: format!("Price hierarchy issue: {msg}"),
        });
    }
    if row.image_src.is_some() {
        if let Err(msg) = validate_image_urls(row.image_src.as_deref(), &deps.remote) {
            issues.push(Issue {
                sku: row.sku.clone(),
                category: Category::Image,
                message: format!("Image issue: {msg}"),
            });
        }
    }
    if row.body_html.is_some() {
        if let Err(msg) = validate_html_content(row.body_html.as_deref()) {
            issues.push(Issue {
                sku: row.sku.clone(),
                category: Category::Html,
                message: format!("HTML content issue: {msg}"),
            });
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::testing::{StubFetcher, StubResolver};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn deps<'a>(resolver: &'a StubResolver, fetcher: &'a StubFetcher) -> Deps<'a> {
        Deps {
            remote: RemoteChecks {
                resolver,
                fetcher,
                offline: false,
            },
            columns: ColumnMap::default(),
        }
    }

    fn clean_row(sku: &str, title: &str, position: i64) -> CatalogRow {
        CatalogRow {
            sku: sku.into(),
            title: title.into(),
            position: Some(position),
            price: Some("100".into()),
            cost: Some("50".into()),
            inventory_qty: Some("3".into()),
            ..CatalogRow::default()
        }
    }

    #[test]
    fn test_clean_rows_produce_empty_report() {
        let resolver = StubResolver(true);
        let fetcher = StubFetcher(Ok(Vec::new()));
        let deps = deps(&resolver, &fetcher);
        let rows = vec![clean_row("A", "Widget", 1), clean_row("B", "Gadget", 1)];
        let report = run_validation(&rows, &deps, &SilentProgress);
        assert!(report.issues.is_empty());
        assert!(report.summary.categories.is_empty());
        assert_eq!(report.summary.rows, 2);
    }

    #[test]
    fn test_order_issues_precede_row_issues() {
        let resolver = StubResolver(true);
        let fetcher = StubFetcher(Ok(Vec::new()));
        let deps = deps(&resolver, &fetcher);
        let mut bad = clean_row("B", "Widget 2", 3);
        bad.inventory_qty = Some("-1".into());
        let rows = vec![clean_row("A", "Widget", 1), bad];
        let report = run_validation(&rows, &deps, &SilentProgress);
        assert_eq!(report.issues[0].category, Category::VariantOrder);
        assert_eq!(report.issues[1].category, Category::VariantOrder);
        assert_eq!(report.issues[2].category, Category::Inventory);
        assert_eq!(report.issues[2].sku, "B");
    }

    #[test]
    fn test_rules_skipped_without_optional_fields() {
        // No image or body fields: their validators must not run at all, so
        // a fetcher that would fail loudly stays untouched.
        let resolver = StubResolver(false);
        let fetcher = StubFetcher(Err(crate::net::FetchError::Timeout));
        let deps = deps(&resolver, &fetcher);
        let rows = vec![clean_row("A", "Widget", 1)];
        let report = run_validation(&rows, &deps, &SilentProgress);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_row_issues_tagged_with_sku() {
        let resolver = StubResolver(true);
        let fetcher = StubFetcher(Ok(Vec::new()));
        let deps = deps(&resolver, &fetcher);
        let mut row = clean_row("SKU-9", "Widget", 1);
        row.price = Some("-2".into());
        row.body_html = Some("<a>broken</a>".into());
        let report = run_validation(&vec![row], &deps, &SilentProgress);
        assert_eq!(report.issues.len(), 2);
        assert!(report.issues.iter().all(|i| i.sku == "SKU-9"));
        assert_eq!(report.issues[0].category, Category::Price);
        assert_eq!(report.issues[1].category, Category::Html);
    }

    #[test]
    fn test_missing_required_values_flagged() {
        let resolver = StubResolver(true);
        let fetcher = StubFetcher(Ok(Vec::new()));
        let deps = deps(&resolver, &fetcher);
        let mut row = clean_row("A", "", 1);
        row.position = None;
        let report = run_validation(&vec![row], &deps, &SilentProgress);
        let pre = &report.issues[0];
        assert_eq!(pre.category, Category::Other);
        assert_eq!(
            pre.message,
            "Missing or invalid required value: Title, Variant Position"
        );
    }

    #[test]
    fn test_progress_called_per_row() {
        struct Counter(AtomicUsize);
        impl Progress for Counter {
            fn on_row(&self, _index: usize, total: usize, _status: &str) {
                assert_eq!(total, 3);
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
        let resolver = StubResolver(true);
        let fetcher = StubFetcher(Ok(Vec::new()));
        let deps = deps(&resolver, &fetcher);
        let rows = vec![
            clean_row("A", "Widget", 1),
            clean_row("B", "Gadget", 1),
            clean_row("C", "Gizmo", 1),
        ];
        let counter = Counter(AtomicUsize::new(0));
        run_validation(&rows, &deps, &counter);
        assert_eq!(counter.0.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_runs_are_idempotent() {
        let resolver = StubResolver(true);
        let fetcher = StubFetcher(Ok(Vec::new()));
        let deps = deps(&resolver, &fetcher);
        let mut bad = clean_row("B", "Widget 2", 3);
        bad.inventory_qty = Some("-1".into());
        let rows = vec![clean_row("A", "Widget", 1), bad];
        let first = run_validation(&rows, &deps, &SilentProgress);
        let second = run_validation(&rows, &deps, &SilentProgress);
        let render = |r: &ValidationReport| {
            r.issues
                .iter()
                .map(|i| format!("{}|{}|{}", i.sku, i.category, i.message))
                .collect::<Vec<_>>()
        };
        assert_eq!(render(&first), render(&second));
    }
}
