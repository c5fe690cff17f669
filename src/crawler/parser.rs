//! Link extraction from fetched markup
//!
//! Parses hyperlink elements, resolves each href against the page URL, and
//! yields only URLs whose source the registry recognizes. Depth gating is
//! the caller's business; extraction itself is depth-blind.

use crate::sites::{SiteRegistry, Source};
use crate::url::normalize_url;
use scraper::{Html, Selector};
use url::Url;

/// Extracts candidate follow-up links from a fetched page
///
/// # Arguments
///
/// * `html` - The fetched markup
/// * `base_url` - The page URL, used to resolve relative hrefs
/// * `registry` - Site registry used to keep only recognized sources
///
/// # Returns
///
/// Normalized absolute URLs paired with their classified source. URLs from
/// unrecognized hosts are dropped.
pub fn extract_links(html: &str, base_url: &Url, registry: &SiteRegistry) -> Vec<(Url, Source)> {
    let document = Html::parse_document(html);

    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(h) => h,
            None => continue,
        };

        let resolved = match resolve_link(href, base_url) {
            Some(u) => u,
            None => continue,
        };

        let source = registry.classify(&resolved);
        if source.is_recognized() {
            links.push((resolved, source));
        }
    }

    links
}

/// Resolves a link href to a normalized absolute URL
///
/// Returns None for hrefs the crawler never follows:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links (same page anchors)
/// - anything that fails to resolve or is not http(s)
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    normalize_url(absolute.as_str()).ok()
}
