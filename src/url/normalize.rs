use crate::UrlError;
use url::Url;

/// Normalizes a URL for identity comparison
///
/// Two URLs that differ only by fragment normalize to the same string and are
/// treated as the same page. Scheme, host, path, params, and query are
/// preserved verbatim: no trailing-slash trimming, no query reordering, no
/// path collapsing. The crawler only ever compares URLs it minted itself.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL with the fragment removed
/// * `Err(UrlError)` - The URL is malformed or not http(s)
///
/// # Examples
///
/// ```
/// use vestnik::url::normalize_url;
///
/// let url = normalize_url("https://ria.ru/page?x=1#top").unwrap();
/// assert_eq!(url.as_str(), "https://ria.ru/page?x=1");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    url.set_fragment(None);

    Ok(url)
}
