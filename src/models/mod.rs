//! Shared data models for catalog rows and validation output.

pub mod row;

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Result shape shared by every validator. `Err` carries the human-readable
/// reason; `Ok` may carry a parsed value for downstream rules.
pub type Outcome<T> = Result<T, String>;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
/// Closed set of issue categories. Each validator tags its own issues, so
/// the summary never has to infer categories from message text.
pub enum Category {
    Inventory,
    Price,
    Image,
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "Variant Order")]
    VariantOrder,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Inventory => "Inventory",
            Category::Price => "Price",
            Category::Image => "Image",
            Category::Html => "HTML",
            Category::VariantOrder => "Variant Order",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Clone, Debug)]
/// A single validation issue tied to one SKU.
pub struct Issue {
    pub sku: String,
    pub category: Category,
    pub message: String,
}

#[derive(Serialize, Debug)]
/// Aggregated counts used by printers and the summary export.
pub struct Summary {
    pub total: usize,
    pub rows: usize,
    /// Count per category; only categories that occurred are present.
    pub categories: BTreeMap<String, usize>,
}

#[derive(Serialize, Debug)]
/// Validation results container.
pub struct ValidationReport {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}

impl ValidationReport {
    /// Build a report from accumulated issues, deriving the summary.
    pub fn new(issues: Vec<Issue>, rows: usize) -> Self {
        let mut categories: BTreeMap<String, usize> = BTreeMap::new();
        for issue in &issues {
            *categories.entry(issue.category.to_string()).or_insert(0) += 1;
        }
        let summary = Summary {
            total: issues.len(),
            rows,
            categories,
        };
        ValidationReport { issues, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_by_category() {
        let issues = vec![
            Issue {
                sku: "A".into(),
                category: Category::Price,
                message: "m1".into(),
            },
            Issue {
                sku: "B".into(),
                category: Category::Price,
                message: "m2".into(),
            },
            Issue {
                sku: "B".into(),
                category: Category::VariantOrder,
                message: "m3".into(),
            },
        ];
        let report = ValidationReport::new(issues, 2);
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.rows, 2);
        assert_eq!(report.summary.categories.get("Price"), Some(&2));
        assert_eq!(report.summary.categories.get("Variant Order"), Some(&1));
        assert_eq!(report.summary.categories.get("HTML"), None);
    }

    #[test]
    fn test_empty_report_has_empty_summary() {
        let report = ValidationReport::new(Vec::new(), 5);
        assert_eq!(report.summary.total, 0);
        assert!(report.summary.categories.is_empty());
    }
}
