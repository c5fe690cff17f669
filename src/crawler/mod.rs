//! Crawler module: fetching, link extraction, and the crawl loop
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with the content-type and timeout policy
//! - Link extraction bounded by crawl depth
//! - Frontier enqueue/dequeue semantics
//! - The top-level drain/sweep/idle loop

mod coordinator;
mod fetcher;
pub mod frontier;
mod parser;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, fetch_url, FetchOutcome};
pub use frontier::EnqueueOutcome;
pub use parser::extract_links;
