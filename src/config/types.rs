use serde::Deserialize;

/// Main configuration structure for Vestnik
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub db: DbConfig,
    pub logic: LogicConfig,
    #[serde(default)]
    pub seed_urls: Vec<SeedUrl>,
}

/// Durable store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    /// Path to the SQLite database holding documents and the frontier
    pub path: String,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LogicConfig {
    /// User-Agent header sent on every fetch
    pub user_agent: String,

    /// Seconds before a stored document is eligible for re-fetch
    #[serde(default = "default_recrawl_interval")]
    pub recrawl_interval: u64,

    /// Maximum link-following depth from a seed
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Stop once this many article documents are stored
    #[serde(default = "default_max_documents")]
    pub max_documents: u64,

    /// Seconds to pause after each processed frontier entry
    #[serde(default = "default_delay")]
    pub delay: f64,
}

/// A seed URL with its source label, used only when both stores are empty
#[derive(Debug, Clone, Deserialize)]
pub struct SeedUrl {
    pub url: String,
    pub source: String,
}

fn default_recrawl_interval() -> u64 {
    86_400
}

fn default_max_depth() -> u32 {
    2
}

fn default_max_documents() -> u64 {
    30_000
}

fn default_delay() -> f64 {
    1.0
}
