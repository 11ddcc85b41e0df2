//! HTML body validator built on an error-tolerant html5ever parse.
//!
//! Malformed markup never fails the parse itself; only structural
//! conventions are reported: anchors need an `href`, images need a `src`,
//! and a top-level list needs at least one direct `li` child.

use crate::models::Outcome;
use scraper::{ElementRef, Html, Selector};

/// Validate an HTML body fragment for structural conventions.
pub fn validate_html_content(html: Option<&str>) -> Outcome<()> {
    let body = match html {
        Some(v) if !v.trim().is_empty() => v,
        _ => return Err("Missing HTML content".to_string()),
    };

    let doc = Html::parse_fragment(body);
    let mut issues: Vec<String> = Vec::new();

    let anchors = Selector::parse("a").expect("anchor selector");
    if doc
        .select(&anchors)
        .any(|a| a.value().attr("href").map_or(true, |v| v.trim().is_empty()))
    {
        issues.push("Found links without href attributes".to_string());
    }

    let images = Selector::parse("img").expect("image selector");
    if doc
        .select(&images)
        .any(|i| i.value().attr("src").map_or(true, |v| v.trim().is_empty()))
    {
        issues.push("Found images without src attributes".to_string());
    }

    let lists = Selector::parse("ul, ol").expect("list selector");
    for list in doc.select(&lists) {
        if is_nested_list(&list) {
            continue;
        }
        if !has_direct_item(&list) {
            issues.push(format!("Found {} without li elements", list.value().name()));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues.join("; "))
    }
}

fn is_nested_list(list: &ElementRef) -> bool {
    list.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|el| matches!(el.value().name(), "ul" | "ol"))
}

fn has_direct_item(list: &ElementRef) -> bool {
    list.children()
        .filter_map(ElementRef::wrap)
        .any(|el| el.value().name() == "li")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_content() {
        assert_eq!(
            validate_html_content(None),
            Err("Missing HTML content".to_string())
        );
        assert_eq!(
            validate_html_content(Some("   ")),
            Err("Missing HTML content".to_string())
        );
    }

    #[test]
    fn test_well_formed_body_passes() {
        let html = r#"<p>Hi</p><a href="/x">link</a><img src="/a.png"><ul><li>one</li></ul>"#;
        assert!(validate_html_content(Some(html)).is_ok());
    }

    #[test]
    fn test_anchor_without_href() {
        let err = validate_html_content(Some("<a>broken</a>")).unwrap_err();
        assert_eq!(err, "Found links without href attributes");
        // An empty href counts as missing too.
        let err = validate_html_content(Some(r#"<a href="">broken</a>"#)).unwrap_err();
        assert_eq!(err, "Found links without href attributes");
    }

    #[test]
    fn test_image_without_src() {
        let err = validate_html_content(Some("<img alt=\"x\">")).unwrap_err();
        assert_eq!(err, "Found images without src attributes");
    }

    #[test]
    fn test_list_without_items() {
        let err = validate_html_content(Some("<ul></ul>")).unwrap_err();
        assert_eq!(err, "Found ul without li elements");
        let err = validate_html_content(Some("<ol><p>text</p></ol>")).unwrap_err();
        assert_eq!(err, "Found ol without li elements");
    }

    #[test]
    fn test_nested_list_not_double_reported() {
        // Only the top-level list is held to the direct-li rule.
        let html = "<ul><li>outer<ul><li>inner</li></ul></li></ul>";
        assert!(validate_html_content(Some(html)).is_ok());
    }

    #[test]
    fn test_issues_joined() {
        let err = validate_html_content(Some("<a>x</a><img><ul></ul>")).unwrap_err();
        assert_eq!(
            err,
            "Found links without href attributes; Found images without src attributes; Found ul without li elements"
        );
    }

    #[test]
    fn test_malformed_markup_does_not_crash() {
        // The parser recovers; unclosed tags alone are not an issue.
        let html = r#"<p>open<a href="/x">ok</a><div>"#;
        assert!(validate_html_content(Some(html)).is_ok());
    }
}
