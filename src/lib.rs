//! Vestnik: a focused news crawler
//!
//! This crate implements a crawler that discovers, fetches, deduplicates, and
//! periodically refreshes pages from a small set of known news domains,
//! classifying each page as an article or a navigation page and persisting it
//! for downstream text extraction.

pub mod config;
pub mod crawler;
pub mod output;
pub mod recrawl;
pub mod sites;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Vestnik operations
#[derive(Debug, Error)]
pub enum VestnikError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for Vestnik operations
pub type Result<T> = std::result::Result<T, VestnikError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::sites::{SiteProfile, SiteRegistry, Source};
pub use crate::storage::{DocType, DocumentChange};
pub use crate::url::normalize_url;
