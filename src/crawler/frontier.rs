//! Frontier enqueue semantics
//!
//! The frontier itself lives in storage; this module implements the gating
//! that decides whether a discovered URL becomes a pending entry.

use crate::recrawl::RecrawlPolicy;
use crate::sites::{SiteRegistry, Source};
use crate::storage::{NewFrontierEntry, Storage};
use crate::url::normalize_url;
use crate::Result;

/// What `enqueue` decided for a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// A new pending entry was inserted
    Enqueued,
    /// An entry already covered this URL
    AlreadyQueued,
    /// A fresh document already covers this URL
    DocumentFresh,
}

/// Enqueues a URL unless an entry or a fresh document already covers it
///
/// The URL is normalized first. A document that the recrawl policy judges
/// stale does not block re-enqueueing; the caller-supplied depth is stored
/// as passed. Priority derives from the registry's article classification.
/// The underlying insert is conditional on URL uniqueness, so a duplicate
/// enqueue is a silent no-op rather than an error.
pub fn enqueue<S: Storage>(
    storage: &mut S,
    registry: &SiteRegistry,
    policy: &RecrawlPolicy,
    url: &str,
    source: Source,
    depth: u32,
    now: i64,
) -> Result<EnqueueOutcome> {
    let normalized = normalize_url(url)?;

    if let Some(meta) = storage.document_meta(normalized.as_str())? {
        if !policy.is_stale(meta.crawled_at, now) {
            return Ok(EnqueueOutcome::DocumentFresh);
        }
    }

    let priority = registry.priority_for(&normalized);
    let inserted = storage.insert_frontier(&NewFrontierEntry {
        url: normalized.as_str(),
        source,
        depth,
        priority,
    })?;

    if inserted {
        tracing::trace!(url = %normalized, depth, priority, "enqueued");
        Ok(EnqueueOutcome::Enqueued)
    } else {
        Ok(EnqueueOutcome::AlreadyQueued)
    }
}
