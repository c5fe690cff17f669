//! Crawl loop orchestration
//!
//! The loop is strictly sequential: one fetch in flight, every store
//! mutation on the same actor. It cycles through seeding (once, on empty
//! stores), draining the frontier, sweeping for expired documents when the
//! frontier runs dry, and idling when even the sweep finds nothing.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchOutcome};
use crate::crawler::frontier;
use crate::crawler::parser::extract_links;
use crate::recrawl::RecrawlPolicy;
use crate::sites::{SiteRegistry, Source};
use crate::storage::{
    content_fingerprint, DocType, DocumentChange, FrontierRecord, NewDocument, SqliteStorage,
    Storage,
};
use crate::Result;
use reqwest::Client;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Sleep between polls while the frontier stays empty
const IDLE_DELAY: Duration = Duration::from_secs(5);

/// The article-count limit is checked every this many processed items, so
/// the corpus may overshoot the limit by up to LIMIT_CHECK_EVERY - 1.
const LIMIT_CHECK_EVERY: u64 = 10;

/// Top-level crawl driver
pub struct Crawler {
    config: Config,
    storage: SqliteStorage,
    registry: SiteRegistry,
    policy: RecrawlPolicy,
    client: Client,
    shutdown: Arc<AtomicBool>,
}

impl Crawler {
    /// Creates a crawler with the registry of known sources
    ///
    /// Fails if the durable store cannot be opened or the HTTP client
    /// cannot be built; the crawler never starts without both.
    pub fn new(config: Config, shutdown: Arc<AtomicBool>) -> Result<Self> {
        Self::with_registry(config, SiteRegistry::known(), shutdown)
    }

    /// Creates a crawler with an explicit site registry
    ///
    /// Tests use this to claim a mock server's host with a custom profile.
    pub fn with_registry(
        config: Config,
        registry: SiteRegistry,
        shutdown: Arc<AtomicBool>,
    ) -> Result<Self> {
        let storage = SqliteStorage::new(Path::new(&config.db.path))?;
        let policy = RecrawlPolicy::new(config.logic.recrawl_interval);
        let client = build_http_client(&config.logic.user_agent)?;

        Ok(Self {
            config,
            storage,
            registry,
            policy,
            client,
            shutdown,
        })
    }

    /// Read access to the underlying storage (used by tests)
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    /// Runs the crawl loop until the article limit is reached or the
    /// shutdown flag is raised
    ///
    /// The flag is only consulted between items, so an in-flight item is
    /// always finished and fully applied before the loop exits.
    pub async fn run(&mut self) -> Result<()> {
        self.seed_if_empty()?;

        let max_documents = self.config.logic.max_documents;
        let delay = Duration::from_secs_f64(self.config.logic.delay);
        let mut processed: u64 = 0;

        tracing::info!("Starting crawl loop");

        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                tracing::info!("Interrupt received, stopping after {} items", processed);
                break;
            }

            if processed % LIMIT_CHECK_EVERY == 0 {
                let articles = self.storage.count_documents_by_type(DocType::Article)?;
                tracing::info!("Progress: {}/{} articles collected", articles, max_documents);
                if articles >= max_documents {
                    tracing::info!("Reached limit of {} articles, stopping", max_documents);
                    break;
                }
            }

            let entry = match self.storage.next_pending()? {
                Some(entry) => entry,
                None => {
                    tracing::debug!("Frontier empty, sweeping for expired documents");
                    self.policy.sweep(&mut self.storage, now())?;

                    match self.storage.next_pending()? {
                        Some(entry) => entry,
                        None => {
                            tracing::debug!("Nothing pending, idling");
                            tokio::time::sleep(IDLE_DELAY).await;
                            continue;
                        }
                    }
                }
            };

            // Per-URL failures are isolated; only storage-level errors
            // escape process_entry.
            if let Err(e) = self.process_entry(&entry).await {
                tracing::error!("Error processing {}: {}", entry.url, e);
            }
            processed += 1;

            tokio::time::sleep(delay).await;
        }

        Ok(())
    }

    /// Enqueues the configured seed URLs, but only into a cold store
    fn seed_if_empty(&mut self) -> Result<()> {
        if self.storage.count_documents()? > 0 || self.storage.count_frontier()? > 0 {
            return Ok(());
        }

        tracing::info!("Seeding frontier with {} URLs", self.config.seed_urls.len());
        let seeds = self.config.seed_urls.clone();
        for seed in &seeds {
            let source = Source::from_db_string(&seed.source);
            frontier::enqueue(
                &mut self.storage,
                &self.registry,
                &self.policy,
                &seed.url,
                source,
                0,
                now(),
            )?;
        }

        Ok(())
    }

    /// Processes a single frontier entry: fetch, record, follow, remove
    async fn process_entry(&mut self, entry: &FrontierRecord) -> Result<()> {
        tracing::debug!("Processing: {}", entry.url);

        match fetch_url(&self.client, &entry.url).await {
            FetchOutcome::NonHtml { content_type } => {
                tracing::info!("Skipping non-html content: {} ({})", entry.url, content_type);
                self.storage.remove_frontier(entry.id)?;
            }

            FetchOutcome::Failed { error } => {
                tracing::warn!("Fetch failed for {}: {}", entry.url, error);
                self.storage.remove_frontier(entry.id)?;
            }

            FetchOutcome::Html { body } => {
                // Entries are stored normalized, so this parse cannot
                // reintroduce a fragment.
                let url = Url::parse(&entry.url)?;

                let doc_type = if self.registry.is_article(&url) {
                    DocType::Article
                } else {
                    DocType::Navigation
                };
                let hash = content_fingerprint(&body);

                let change = self.storage.record_document(&NewDocument {
                    url: entry.url.as_str(),
                    html: &body,
                    source: entry.source,
                    doc_type,
                    hash: &hash,
                    crawled_at: now(),
                })?;

                match change {
                    DocumentChange::Created => match doc_type {
                        DocType::Article => tracing::info!("[+] New article: {}", entry.url),
                        DocType::Navigation => tracing::info!("[ ] New navigation: {}", entry.url),
                    },
                    DocumentChange::ContentChanged => {
                        tracing::info!("Updated content: {}", entry.url)
                    }
                    DocumentChange::TypeChanged => {
                        tracing::info!("Reclassified as {}: {}", doc_type.to_db_string(), entry.url)
                    }
                    DocumentChange::Unchanged => tracing::debug!("Unchanged: {}", entry.url),
                }

                if entry.depth < self.config.logic.max_depth {
                    self.follow_links(&body, &url, entry.depth)?;
                }

                self.storage.remove_frontier(entry.id)?;
            }
        }

        Ok(())
    }

    /// Extracts links from a fetched page and enqueues the novel ones
    fn follow_links(&mut self, body: &str, page_url: &Url, depth: u32) -> Result<()> {
        let links = extract_links(body, page_url, &self.registry);
        tracing::debug!("Extracted {} candidate links from {}", links.len(), page_url);

        for (link, source) in links {
            if let Err(e) = frontier::enqueue(
                &mut self.storage,
                &self.registry,
                &self.policy,
                link.as_str(),
                source,
                depth + 1,
                now(),
            ) {
                tracing::debug!("Failed to enqueue {}: {}", link, e);
            }
        }

        Ok(())
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DbConfig, LogicConfig, SeedUrl};

    fn test_config(db_path: &str) -> Config {
        Config {
            db: DbConfig {
                path: db_path.to_string(),
            },
            logic: LogicConfig {
                user_agent: "VestnikBot/0.2".to_string(),
                recrawl_interval: 86_400,
                max_depth: 2,
                max_documents: 10,
                delay: 0.0,
            },
            seed_urls: vec![SeedUrl {
                url: "https://ria.ru/index.html".to_string(),
                source: "ria".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_seeding_only_on_empty_stores() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("crawl.db");
        let config = test_config(db_path.to_str().unwrap());
        let shutdown = Arc::new(AtomicBool::new(false));

        let mut crawler = Crawler::new(config, shutdown).unwrap();
        crawler.seed_if_empty().unwrap();
        assert_eq!(crawler.storage().count_frontier().unwrap(), 1);

        // Second call sees a non-empty frontier and seeds nothing
        crawler.seed_if_empty().unwrap();
        assert_eq!(crawler.storage().count_frontier().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_seed_priority_is_navigation_tier() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("crawl.db");
        let config = test_config(db_path.to_str().unwrap());
        let shutdown = Arc::new(AtomicBool::new(false));

        let mut crawler = Crawler::new(config, shutdown).unwrap();
        crawler.seed_if_empty().unwrap();

        let entry = crawler.storage().next_pending().unwrap().unwrap();
        assert_eq!(entry.url, "https://ria.ru/index.html");
        assert_eq!(entry.priority, crate::sites::PRIORITY_NAVIGATION);
        assert_eq!(entry.depth, 0);
    }

    #[tokio::test]
    async fn test_shutdown_flag_stops_loop() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("crawl.db");
        let config = test_config(db_path.to_str().unwrap());

        let shutdown = Arc::new(AtomicBool::new(true));
        let mut crawler = Crawler::new(config, shutdown).unwrap();

        // Flag already raised: run returns without processing anything
        crawler.run().await.unwrap();
        assert_eq!(crawler.storage().count_documents().unwrap(), 0);
    }
}
