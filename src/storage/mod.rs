//! Storage module for the document store and frontier
//!
//! This module handles all database operations for the crawler, including:
//! - SQLite database initialization and schema management
//! - The document store with hash-based change detection
//! - The durable frontier queue with its uniqueness invariant

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::sites::Source;
use crate::VestnikError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Initializes or opens a storage database
pub fn open_storage(path: &Path) -> Result<SqliteStorage, VestnikError> {
    SqliteStorage::new(path)
}

/// Computes the content fingerprint of raw markup
///
/// Used only to detect unchanged content between fetches; any
/// collision-tolerant digest would do.
pub fn content_fingerprint(html: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(html.as_bytes());
    hex::encode(hasher.finalize())
}

/// Whether a fetched page is an article or a navigation page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocType {
    Article,
    Navigation,
}

impl DocType {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Navigation => "navigation",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "article" => Some(Self::Article),
            "navigation" => Some(Self::Navigation),
            _ => None,
        }
    }
}

/// A stored document, one per normalized URL
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    pub id: i64,
    pub url: String,
    pub html: String,
    pub source: Source,
    pub doc_type: DocType,
    pub hash: String,
    pub crawled_at: i64,
}

/// The change-detection fields of a stored document
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub hash: String,
    pub doc_type: DocType,
    pub crawled_at: i64,
}

/// A successful fetch about to be recorded
#[derive(Debug)]
pub struct NewDocument<'a> {
    pub url: &'a str,
    pub html: &'a str,
    pub source: Source,
    pub doc_type: DocType,
    pub hash: &'a str,
    pub crawled_at: i64,
}

/// What `record_document` did with a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentChange {
    /// First fetch of this URL; a document was inserted
    Created,
    /// Fingerprint differed; html, hash, and doc_type refreshed together
    ContentChanged,
    /// Fingerprint matched but classification differed; doc_type refreshed
    TypeChanged,
    /// Only crawled_at was refreshed
    Unchanged,
}

/// A pending frontier entry
#[derive(Debug, Clone)]
pub struct FrontierRecord {
    pub id: i64,
    pub url: String,
    pub source: Source,
    pub depth: u32,
    pub priority: i64,
}

/// A frontier entry about to be inserted
#[derive(Debug)]
pub struct NewFrontierEntry<'a> {
    pub url: &'a str,
    pub source: Source,
    pub depth: u32,
    pub priority: i64,
}
