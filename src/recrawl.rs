//! Recrawl policy: staleness checks and the bulk refill sweep

use crate::sites::PRIORITY_NAVIGATION;
use crate::storage::{NewFrontierEntry, Storage};
use crate::Result;

/// Decides when a stored document is stale and re-injects stale documents
/// into the frontier
#[derive(Debug, Clone, Copy)]
pub struct RecrawlPolicy {
    interval_secs: u64,
}

impl RecrawlPolicy {
    pub fn new(interval_secs: u64) -> Self {
        Self { interval_secs }
    }

    /// Returns true if a document last crawled at `crawled_at` is due again
    ///
    /// Strictly greater: a document exactly `interval` old is still fresh.
    pub fn is_stale(&self, crawled_at: i64, now: i64) -> bool {
        now - crawled_at > self.interval_secs as i64
    }

    /// Scans the document store for stale documents and enqueues each one
    /// not already present in the frontier
    ///
    /// Swept entries re-enter at depth 0 on the navigation tier; the sweep
    /// does not distinguish articles from navigation pages.
    ///
    /// # Returns
    ///
    /// The number of entries added to the frontier.
    pub fn sweep<S: Storage>(&self, storage: &mut S, now: i64) -> Result<usize> {
        let cutoff = now - self.interval_secs as i64;
        let stale = storage.stale_documents(cutoff)?;

        let mut added = 0;
        for (url, source) in stale {
            if storage.frontier_contains(&url)? {
                continue;
            }

            let inserted = storage.insert_frontier(&NewFrontierEntry {
                url: &url,
                source,
                depth: 0,
                priority: PRIORITY_NAVIGATION,
            })?;

            if inserted {
                added += 1;
            }
        }

        if added > 0 {
            tracing::info!("Recrawl sweep enqueued {} expired documents", added);
        } else {
            tracing::debug!("Recrawl sweep found no expired documents");
        }

        Ok(added)
    }
}
