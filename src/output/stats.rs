//! Crawl statistics reporting

use crate::sites::Source;
use crate::storage::{DocType, Storage};
use crate::Result;

/// Snapshot of the store's contents
#[derive(Debug)]
pub struct CrawlStatistics {
    pub total_documents: u64,
    pub articles: u64,
    pub navigation: u64,
    pub pending: u64,
    pub by_source: Vec<(Source, u64)>,
}

/// Loads statistics from storage
pub fn load_statistics<S: Storage>(storage: &S) -> Result<CrawlStatistics> {
    Ok(CrawlStatistics {
        total_documents: storage.count_documents()?,
        articles: storage.count_documents_by_type(DocType::Article)?,
        navigation: storage.count_documents_by_type(DocType::Navigation)?,
        pending: storage.count_frontier()?,
        by_source: storage.count_documents_by_source()?,
    })
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Documents:");
    println!("  Total:      {}", stats.total_documents);
    println!("  Articles:   {}", stats.articles);
    println!("  Navigation: {}", stats.navigation);

    if !stats.by_source.is_empty() {
        println!("\nBy source:");
        for (source, count) in &stats.by_source {
            println!("  {:<10} {}", source.to_db_string(), count);
        }
    }

    println!("\nFrontier:");
    println!("  Pending:    {}", stats.pending);
}
