//! SQLite storage implementation

use crate::sites::Source;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageResult};
use crate::storage::{
    DocType, DocumentChange, DocumentMeta, DocumentRecord, FrontierRecord, NewDocument,
    NewFrontierEntry,
};
use crate::VestnikError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(VestnikError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, VestnikError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, VestnikError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn row_to_frontier(row: &rusqlite::Row<'_>) -> rusqlite::Result<FrontierRecord> {
        Ok(FrontierRecord {
            id: row.get(0)?,
            url: row.get(1)?,
            source: Source::from_db_string(&row.get::<_, String>(2)?),
            depth: row.get(3)?,
            priority: row.get(4)?,
        })
    }
}

impl Storage for SqliteStorage {
    // ===== Document store =====

    fn get_document(&self, url: &str) -> StorageResult<Option<DocumentRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, url, html, source, doc_type, hash, crawled_at
             FROM documents WHERE url = ?1",
        )?;

        let doc = stmt
            .query_row(params![url], |row| {
                Ok(DocumentRecord {
                    id: row.get(0)?,
                    url: row.get(1)?,
                    html: row.get(2)?,
                    source: Source::from_db_string(&row.get::<_, String>(3)?),
                    doc_type: DocType::from_db_string(&row.get::<_, String>(4)?)
                        .unwrap_or(DocType::Navigation),
                    hash: row.get(5)?,
                    crawled_at: row.get(6)?,
                })
            })
            .optional()?;

        Ok(doc)
    }

    fn document_meta(&self, url: &str) -> StorageResult<Option<DocumentMeta>> {
        let mut stmt = self
            .conn
            .prepare("SELECT hash, doc_type, crawled_at FROM documents WHERE url = ?1")?;

        let meta = stmt
            .query_row(params![url], |row| {
                Ok(DocumentMeta {
                    hash: row.get(0)?,
                    doc_type: DocType::from_db_string(&row.get::<_, String>(1)?)
                        .unwrap_or(DocType::Navigation),
                    crawled_at: row.get(2)?,
                })
            })
            .optional()?;

        Ok(meta)
    }

    fn record_document(&mut self, doc: &NewDocument<'_>) -> StorageResult<DocumentChange> {
        let existing = self.document_meta(doc.url)?;

        match existing {
            None => {
                self.conn.execute(
                    "INSERT INTO documents (url, html, source, doc_type, hash, crawled_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        doc.url,
                        doc.html,
                        doc.source.to_db_string(),
                        doc.doc_type.to_db_string(),
                        doc.hash,
                        doc.crawled_at
                    ],
                )?;
                Ok(DocumentChange::Created)
            }
            Some(meta) if meta.hash != doc.hash => {
                // Content changed: html, hash, and doc_type move together so
                // they stay consistent with each other.
                self.conn.execute(
                    "UPDATE documents
                     SET html = ?1, hash = ?2, doc_type = ?3, crawled_at = ?4
                     WHERE url = ?5",
                    params![
                        doc.html,
                        doc.hash,
                        doc.doc_type.to_db_string(),
                        doc.crawled_at,
                        doc.url
                    ],
                )?;
                Ok(DocumentChange::ContentChanged)
            }
            Some(meta) if meta.doc_type != doc.doc_type => {
                self.conn.execute(
                    "UPDATE documents SET doc_type = ?1, crawled_at = ?2 WHERE url = ?3",
                    params![doc.doc_type.to_db_string(), doc.crawled_at, doc.url],
                )?;
                Ok(DocumentChange::TypeChanged)
            }
            Some(_) => {
                self.conn.execute(
                    "UPDATE documents SET crawled_at = ?1 WHERE url = ?2",
                    params![doc.crawled_at, doc.url],
                )?;
                Ok(DocumentChange::Unchanged)
            }
        }
    }

    fn count_documents(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_documents_by_type(&self, doc_type: DocType) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE doc_type = ?1",
            params![doc_type.to_db_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_documents_by_source(&self) -> StorageResult<Vec<(Source, u64)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT source, COUNT(*) FROM documents GROUP BY source ORDER BY source")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    Source::from_db_string(&row.get::<_, String>(0)?),
                    row.get::<_, i64>(1)? as u64,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn stale_documents(&self, cutoff: i64) -> StorageResult<Vec<(String, Source)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT url, source FROM documents WHERE crawled_at < ?1")?;

        let rows = stmt
            .query_map(params![cutoff], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    Source::from_db_string(&row.get::<_, String>(1)?),
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn article_documents(&self) -> StorageResult<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT url, html FROM documents WHERE doc_type = ?1 ORDER BY id ASC",
        )?;

        let rows = stmt
            .query_map(params![DocType::Article.to_db_string()], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    // ===== Frontier =====

    fn insert_frontier(&mut self, entry: &NewFrontierEntry<'_>) -> StorageResult<bool> {
        // The conflict path IS the dedup: a concurrent or repeated enqueue
        // lands on the UNIQUE(url) constraint and inserts nothing.
        let inserted = self.conn.execute(
            "INSERT INTO frontier (url, source, depth, status, priority, next_crawl)
             VALUES (?1, ?2, ?3, 'pending', ?4, 0)
             ON CONFLICT(url) DO NOTHING",
            params![
                entry.url,
                entry.source.to_db_string(),
                entry.depth,
                entry.priority
            ],
        )?;

        Ok(inserted > 0)
    }

    fn frontier_contains(&self, url: &str) -> StorageResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM frontier WHERE url = ?1",
                params![url],
                |row| row.get(0),
            )
            .optional()?;

        Ok(found.is_some())
    }

    fn next_pending(&self) -> StorageResult<Option<FrontierRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, url, source, depth, priority FROM frontier
             WHERE status = 'pending'
             ORDER BY priority DESC, id ASC
             LIMIT 1",
        )?;

        let entry = stmt.query_row([], Self::row_to_frontier).optional()?;

        Ok(entry)
    }

    fn remove_frontier(&mut self, id: i64) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM frontier WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn count_frontier(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM frontier", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::content_fingerprint;

    fn entry<'a>(url: &'a str, priority: i64) -> NewFrontierEntry<'a> {
        NewFrontierEntry {
            url,
            source: Source::Ria,
            depth: 0,
            priority,
        }
    }

    fn doc<'a>(url: &'a str, html: &'a str, hash: &'a str, doc_type: DocType) -> NewDocument<'a> {
        NewDocument {
            url,
            html,
            source: Source::Ria,
            doc_type,
            hash,
            crawled_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_create_in_memory() {
        assert!(SqliteStorage::new_in_memory().is_ok());
    }

    #[test]
    fn test_insert_frontier_is_idempotent() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();

        assert!(storage.insert_frontier(&entry("https://ria.ru/", 1)).unwrap());
        assert!(!storage.insert_frontier(&entry("https://ria.ru/", 1)).unwrap());

        assert_eq!(storage.count_frontier().unwrap(), 1);
    }

    #[test]
    fn test_next_pending_orders_by_priority() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();

        // Article enqueued before the navigation URL
        storage
            .insert_frontier(&entry("https://ria.ru/world/2024-123456.html", 10))
            .unwrap();
        storage.insert_frontier(&entry("https://ria.ru/index.html", 1)).unwrap();

        let next = storage.next_pending().unwrap().unwrap();
        assert_eq!(next.url, "https://ria.ru/world/2024-123456.html");
        assert_eq!(next.priority, 10);
    }

    #[test]
    fn test_next_pending_fifo_within_priority_band() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();

        storage.insert_frontier(&entry("https://ria.ru/a", 1)).unwrap();
        storage.insert_frontier(&entry("https://ria.ru/b", 1)).unwrap();

        let first = storage.next_pending().unwrap().unwrap();
        assert_eq!(first.url, "https://ria.ru/a");

        storage.remove_frontier(first.id).unwrap();
        let second = storage.next_pending().unwrap().unwrap();
        assert_eq!(second.url, "https://ria.ru/b");
    }

    #[test]
    fn test_next_pending_empty() {
        let storage = SqliteStorage::new_in_memory().unwrap();
        assert!(storage.next_pending().unwrap().is_none());
    }

    #[test]
    fn test_remove_frontier() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();

        storage.insert_frontier(&entry("https://ria.ru/", 1)).unwrap();
        let pending = storage.next_pending().unwrap().unwrap();
        storage.remove_frontier(pending.id).unwrap();

        assert_eq!(storage.count_frontier().unwrap(), 0);
        assert!(!storage.frontier_contains("https://ria.ru/").unwrap());
    }

    #[test]
    fn test_record_document_creates() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let html = "<html>one</html>";
        let hash = content_fingerprint(html);

        let change = storage
            .record_document(&doc("https://ria.ru/a", html, &hash, DocType::Navigation))
            .unwrap();

        assert_eq!(change, DocumentChange::Created);
        assert_eq!(storage.count_documents().unwrap(), 1);
    }

    #[test]
    fn test_record_document_unchanged_touches_only_timestamp() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let html = "<html>one</html>";
        let hash = content_fingerprint(html);

        storage
            .record_document(&doc("https://ria.ru/a", html, &hash, DocType::Navigation))
            .unwrap();

        let mut second = doc("https://ria.ru/a", html, &hash, DocType::Navigation);
        second.crawled_at = 1_700_000_100;
        let change = storage.record_document(&second).unwrap();

        assert_eq!(change, DocumentChange::Unchanged);

        let stored = storage.get_document("https://ria.ru/a").unwrap().unwrap();
        assert_eq!(stored.crawled_at, 1_700_000_100);
        assert_eq!(stored.hash, hash);
        assert_eq!(stored.html, html);
        assert_eq!(stored.doc_type, DocType::Navigation);
    }

    #[test]
    fn test_record_document_content_change_refreshes_jointly() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let old_html = "<html>one</html>";
        let old_hash = content_fingerprint(old_html);

        storage
            .record_document(&doc("https://ria.ru/a", old_html, &old_hash, DocType::Navigation))
            .unwrap();

        let new_html = "<html>two</html>";
        let new_hash = content_fingerprint(new_html);
        let mut second = doc("https://ria.ru/a", new_html, &new_hash, DocType::Article);
        second.crawled_at = 1_700_000_100;
        let change = storage.record_document(&second).unwrap();

        assert_eq!(change, DocumentChange::ContentChanged);

        let stored = storage.get_document("https://ria.ru/a").unwrap().unwrap();
        assert_eq!(stored.html, new_html);
        assert_eq!(stored.hash, new_hash);
        assert_eq!(stored.doc_type, DocType::Article);
        assert_eq!(stored.crawled_at, 1_700_000_100);
    }

    #[test]
    fn test_record_document_type_drift_without_content_change() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let html = "<html>one</html>";
        let hash = content_fingerprint(html);

        storage
            .record_document(&doc("https://ria.ru/a", html, &hash, DocType::Navigation))
            .unwrap();

        let change = storage
            .record_document(&doc("https://ria.ru/a", html, &hash, DocType::Article))
            .unwrap();

        assert_eq!(change, DocumentChange::TypeChanged);

        let stored = storage.get_document("https://ria.ru/a").unwrap().unwrap();
        assert_eq!(stored.doc_type, DocType::Article);
        assert_eq!(stored.hash, hash);
    }

    #[test]
    fn test_count_documents_by_type() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let hash_a = content_fingerprint("a");
        let hash_b = content_fingerprint("b");

        storage
            .record_document(&doc("https://ria.ru/a", "a", &hash_a, DocType::Article))
            .unwrap();
        storage
            .record_document(&doc("https://ria.ru/b", "b", &hash_b, DocType::Navigation))
            .unwrap();

        assert_eq!(storage.count_documents_by_type(DocType::Article).unwrap(), 1);
        assert_eq!(
            storage.count_documents_by_type(DocType::Navigation).unwrap(),
            1
        );
    }

    #[test]
    fn test_stale_documents_cutoff_is_strict() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let hash = content_fingerprint("a");

        let mut old = doc("https://ria.ru/old", "a", &hash, DocType::Article);
        old.crawled_at = 100;
        storage.record_document(&old).unwrap();

        let mut fresh = doc("https://ria.ru/fresh", "a", &hash, DocType::Article);
        fresh.crawled_at = 200;
        storage.record_document(&fresh).unwrap();

        let stale = storage.stale_documents(200).unwrap();
        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].0, "https://ria.ru/old");
    }

    #[test]
    fn test_article_documents_in_insertion_order() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let hash = content_fingerprint("a");

        storage
            .record_document(&doc("https://ria.ru/b", "a", &hash, DocType::Article))
            .unwrap();
        storage
            .record_document(&doc("https://ria.ru/nav", "a", &hash, DocType::Navigation))
            .unwrap();
        storage
            .record_document(&doc("https://ria.ru/a", "a", &hash, DocType::Article))
            .unwrap();

        let articles = storage.article_documents().unwrap();
        assert_eq!(articles.len(), 2);
        // Insertion order, not URL order
        assert_eq!(articles[0].0, "https://ria.ru/b");
        assert_eq!(articles[1].0, "https://ria.ru/a");
    }

    #[test]
    fn test_source_stored_and_grouped() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let hash = content_fingerprint("a");

        let mut rbc = doc("https://rbc.ru/a", "a", &hash, DocType::Article);
        rbc.source = Source::Rbc;
        storage.record_document(&rbc).unwrap();
        storage
            .record_document(&doc("https://ria.ru/a", "a", &hash, DocType::Article))
            .unwrap();

        let by_source = storage.count_documents_by_source().unwrap();
        assert_eq!(by_source.len(), 2);
        assert!(by_source.contains(&(Source::Ria, 1)));
        assert!(by_source.contains(&(Source::Rbc, 1)));
    }
}
