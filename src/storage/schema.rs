//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the Vestnik database.

/// SQL schema for the database
///
/// Both tables are keyed uniquely by normalized URL; the UNIQUE constraints
/// back the one-document-per-URL and at-most-one-pending-entry invariants.
pub const SCHEMA_SQL: &str = r#"
-- Every fetched page of record
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL UNIQUE,
    html TEXT NOT NULL,
    source TEXT NOT NULL,
    doc_type TEXT NOT NULL,
    hash TEXT NOT NULL,
    crawled_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_documents_type ON documents(doc_type);
CREATE INDEX IF NOT EXISTS idx_documents_crawled_at ON documents(crawled_at);

-- Pending crawl work; id doubles as insertion order for FIFO tie-breaks
CREATE TABLE IF NOT EXISTS frontier (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL UNIQUE,
    source TEXT NOT NULL,
    depth INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'pending',
    priority INTEGER NOT NULL DEFAULT 1,
    next_crawl INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_frontier_priority ON frontier(priority DESC, id ASC);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
