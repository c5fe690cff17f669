use crate::sites::{SiteProfile, Source};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

// Article URLs carry a numeric id before the terminal ".html",
// e.g. https://ria.ru/20240101/world-1912345678.html
static ARTICLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"ria\.ru/.*-\d+\.html").expect("ria article pattern is valid")
});

/// Site profile for ria.ru
pub struct RiaProfile;

impl SiteProfile for RiaProfile {
    fn source(&self) -> Source {
        Source::Ria
    }

    fn matches_host(&self, host: &str) -> bool {
        host.contains("ria.ru")
    }

    fn is_article(&self, url: &Url) -> bool {
        ARTICLE_RE.is_match(url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_matches_host() {
        let profile = RiaProfile;
        assert!(profile.matches_host("ria.ru"));
        assert!(profile.matches_host("www.ria.ru"));
        assert!(!profile.matches_host("rbc.ru"));
    }

    #[test]
    fn test_article_url() {
        let profile = RiaProfile;
        assert!(profile.is_article(&url("https://ria.ru/world/2024-123456.html")));
        assert!(profile.is_article(&url("https://ria.ru/20240101/sobytie-1912345678.html")));
    }

    #[test]
    fn test_navigation_url() {
        let profile = RiaProfile;
        assert!(!profile.is_article(&url("https://ria.ru/index.html")));
        assert!(!profile.is_article(&url("https://ria.ru/world/")));
        assert!(!profile.is_article(&url("https://ria.ru/world/2024-123456")));
    }
}
