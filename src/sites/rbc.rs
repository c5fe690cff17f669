use crate::sites::{SiteProfile, Source};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

// Article URLs embed a 24-character hex object id,
// e.g. https://www.rbc.ru/politics/01/01/2024/6592a1b2c3d4e5f601234567
static ARTICLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"rbc\.ru/.*[0-9a-f]{24}").expect("rbc article pattern is valid")
});

/// Site profile for rbc.ru
pub struct RbcProfile;

impl SiteProfile for RbcProfile {
    fn source(&self) -> Source {
        Source::Rbc
    }

    fn matches_host(&self, host: &str) -> bool {
        host.contains("rbc.ru")
    }

    fn is_article(&self, url: &Url) -> bool {
        ARTICLE_RE.is_match(url.as_str())
    }
}
