//! HTTP fetcher implementation
//!
//! One GET per frontier entry, a bounded timeout, and a content-type gate
//! that abandons non-HTML responses before the body is read. The fetcher
//! never retries; a failed URL comes back only through link rediscovery or
//! the recrawl sweep.

use reqwest::Client;
use std::time::Duration;

/// Request timeout for a single fetch
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched an HTML page
    Html { body: String },

    /// Response declared a non-HTML content type; body was not read
    NonHtml { content_type: String },

    /// HTTP error status or network-level failure
    Failed { error: String },
}

/// Builds the HTTP client used for every fetch
///
/// # Arguments
///
/// * `user_agent` - Identification header sent on every request
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(FETCH_TIMEOUT)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// The declared Content-Type is inspected before the body is consumed: any
/// non-HTML response is dropped unread and reported as a skip, not an
/// error. Error statuses and network failures (timeout, DNS, reset) both
/// map to `Failed`.
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            let error = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                "connection failed".to_string()
            } else {
                e.to_string()
            };
            return FetchOutcome::Failed { error };
        }
    };

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("text/html") {
        // Dropping the response releases the connection without reading
        // the body.
        drop(response);
        return FetchOutcome::NonHtml { content_type };
    }

    let response = match response.error_for_status() {
        Ok(r) => r,
        Err(e) => {
            return FetchOutcome::Failed {
                error: e.to_string(),
            }
        }
    };

    match response.text().await {
        Ok(body) => FetchOutcome::Html { body },
        Err(e) => FetchOutcome::Failed {
            error: e.to_string(),
        },
    }
}
