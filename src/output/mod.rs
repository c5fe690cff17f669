//! Downstream interfaces over the document store
//!
//! This module handles:
//! - Exporting the article corpus for the text-extraction pipeline
//! - Reporting crawl statistics

mod corpus;
pub mod stats;

pub use corpus::{clean_text, export_corpus, ExportReport};
pub use stats::{load_statistics, print_statistics, CrawlStatistics};
