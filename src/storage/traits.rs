//! Storage traits and error types

use crate::sites::Source;
use crate::storage::{
    DocType, DocumentChange, DocumentMeta, DocumentRecord, FrontierRecord, NewDocument,
    NewFrontierEntry,
};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// The document store and the frontier are the sole persisted state; restart
/// safety derives entirely from this interface. Frontier insertion is a
/// single conditional operation so a uniqueness conflict is the "already
/// enqueued" success path, never an error.
pub trait Storage {
    // ===== Document store =====

    /// Fetches a full document by normalized URL
    fn get_document(&self, url: &str) -> StorageResult<Option<DocumentRecord>>;

    /// Fetches only the change-detection fields of a document
    fn document_meta(&self, url: &str) -> StorageResult<Option<DocumentMeta>>;

    /// Records a successful fetch, applying the three-way change branch
    ///
    /// New URL: insert. Known URL with a different fingerprint: refresh
    /// html/hash/doc_type together. Known URL, same fingerprint, different
    /// classification: refresh doc_type alone. Otherwise only crawled_at
    /// moves; crawled_at is refreshed in every case.
    fn record_document(&mut self, doc: &NewDocument<'_>) -> StorageResult<DocumentChange>;

    /// Total number of stored documents
    fn count_documents(&self) -> StorageResult<u64>;

    /// Number of stored documents of the given type
    fn count_documents_by_type(&self, doc_type: DocType) -> StorageResult<u64>;

    /// Document counts grouped by source
    fn count_documents_by_source(&self) -> StorageResult<Vec<(Source, u64)>>;

    /// URLs and sources of documents with `crawled_at` strictly before the cutoff
    fn stale_documents(&self, cutoff: i64) -> StorageResult<Vec<(String, Source)>>;

    /// `(url, html)` of every article document, in store iteration order
    fn article_documents(&self) -> StorageResult<Vec<(String, String)>>;

    // ===== Frontier =====

    /// Inserts a pending entry unless one already exists for the URL
    ///
    /// Returns `true` if a row was inserted, `false` if the URL was already
    /// queued.
    fn insert_frontier(&mut self, entry: &NewFrontierEntry<'_>) -> StorageResult<bool>;

    /// Returns true if a pending entry exists for the URL
    fn frontier_contains(&self, url: &str) -> StorageResult<bool>;

    /// Highest-priority pending entry, FIFO within a priority band
    fn next_pending(&self) -> StorageResult<Option<FrontierRecord>>;

    /// Deletes an entry unconditionally
    fn remove_frontier(&mut self, id: i64) -> StorageResult<()>;

    /// Number of pending entries
    fn count_frontier(&self) -> StorageResult<u64>;
}
