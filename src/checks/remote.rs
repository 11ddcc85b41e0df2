//! URL and remote image validators.
//!
//! Syntactic checks always run; DNS resolution and image fetches go through
//! the seams in `crate::net` and are skipped entirely in offline mode.

use crate::models::Outcome;
use crate::net::{DomainResolver, FetchError, ImageFetcher};
use image::GenericImageView;
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Accepted image file extensions, matched case-insensitively on the path.
const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Dependencies for the remote checks plus the offline gate.
pub struct RemoteChecks<'a> {
    pub resolver: &'a dyn DomainResolver,
    pub fetcher: &'a dyn ImageFetcher,
    pub offline: bool,
}

fn src_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"src=['"](.*?)['"]"#).expect("src attribute pattern"))
}

/// Validate a URL's structure, domain reachability, and image extension.
pub fn validate_url(url: &str, deps: &RemoteChecks) -> Outcome<()> {
    let parsed = Url::parse(url.trim()).map_err(|e| format!("Malformed URL: {e}"))?;
    let host = match parsed.host_str() {
        Some(h) => h,
        None => return Err("Missing URL scheme or host".to_string()),
    };
    if !deps.offline && !deps.resolver.resolves(host) {
        return Err("Domain not resolvable".to_string());
    }
    let path = parsed.path().to_ascii_lowercase();
    if !IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return Err("Invalid image extension".to_string());
    }
    Ok(())
}

/// Fetch and decode an image, accepting 825x825 or any square dimensions.
///
/// Timeouts are reported distinctly from other fetch failures, and both
/// distinctly from undecodable bodies. Skipped in offline mode.
pub fn validate_image_dimensions(url: &str, deps: &RemoteChecks) -> Outcome<()> {
    if deps.offline {
        return Ok(());
    }
    let body = match deps.fetcher.fetch(url) {
        Ok(body) => body,
        Err(FetchError::Timeout) => return Err("Timed out fetching image".to_string()),
        Err(e) => return Err(format!("Error fetching image: {e}")),
    };
    let img =
        image::load_from_memory(&body).map_err(|e| format!("Could not decode image: {e}"))?;
    let (width, height) = img.dimensions();
    if width == 825 && height == 825 {
        return Ok(());
    }
    if width != height {
        return Err(format!(
            "Image dimensions {width}x{height} do not maintain 1:1 ratio"
        ));
    }
    Ok(())
}

/// Validate a semicolon-separated image URL field.
///
/// Each segment may be a bare URL or an HTML snippet carrying one or more
/// `src="..."` attributes. Every extracted URL is checked independently;
/// failures accumulate across URLs and are joined with "; ".
pub fn validate_image_urls(field: Option<&str>, deps: &RemoteChecks) -> Outcome<()> {
    let raw = match field {
        Some(v) if !v.trim().is_empty() => v,
        _ => return Err("Missing image URL".to_string()),
    };

    let mut urls: Vec<String> = Vec::new();
    for segment in raw.split(';') {
        let mut matched = false;
        for cap in src_attr_re().captures_iter(segment) {
            urls.push(cap[1].to_string());
            matched = true;
        }
        if !matched {
            urls.push(segment.trim().to_string());
        }
    }
    urls.retain(|u| !u.trim().is_empty());
    if urls.is_empty() {
        return Err("No valid URLs found".to_string());
    }

    let mut issues: Vec<String> = Vec::new();
    for url in &urls {
        if let Err(e) = validate_url(url, deps) {
            issues.push(format!("Invalid URL {url}: {e}"));
            continue;
        }
        if let Err(e) = validate_image_dimensions(url, deps) {
            issues.push(format!("Invalid dimensions for {url}: {e}"));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues.join("; "))
    }
}
