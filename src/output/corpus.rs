//! Plain-text corpus export
//!
//! Reads the store's article documents in iteration order and writes two
//! parallel files: one cleaned text line per document, and the matching
//! source URL on the same line number of the companion file.

use crate::storage::Storage;
use crate::Result;
use scraper::{ElementRef, Html};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Elements whose entire subtree is dropped from the cleaned text
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "header", "footer", "nav"];

/// Summary of a completed export
#[derive(Debug)]
pub struct ExportReport {
    pub documents: usize,
}

/// Strips markup down to readable text
///
/// Chrome elements (script/style/header/footer/nav) are removed with their
/// subtrees; the remaining text nodes are joined and all whitespace runs
/// collapse to single spaces.
pub fn clean_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    if SKIPPED_ELEMENTS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            collect_text(child_element, out);
        } else if let Some(text) = child.value().as_text() {
            out.push(' ');
            out.push_str(text);
        }
    }
}

/// Exports every article document to `corpus.txt` + `urls.txt` in `dir`
///
/// Line order equals store iteration order, one document per line; newlines
/// inside a document's text are already collapsed by `clean_text`.
pub fn export_corpus<S: Storage>(storage: &S, dir: &Path) -> Result<ExportReport> {
    std::fs::create_dir_all(dir)?;

    let corpus_path = dir.join("corpus.txt");
    let urls_path = dir.join("urls.txt");

    tracing::info!(
        "Exporting articles to {} and {}",
        corpus_path.display(),
        urls_path.display()
    );

    let mut corpus = BufWriter::new(File::create(&corpus_path)?);
    let mut urls = BufWriter::new(File::create(&urls_path)?);

    let articles = storage.article_documents()?;
    let mut count = 0;
    for (url, html) in &articles {
        let text = clean_text(html);

        corpus.write_all(text.as_bytes())?;
        corpus.write_all(b"\n")?;
        urls.write_all(url.as_bytes())?;
        urls.write_all(b"\n")?;

        count += 1;
        if count % 100 == 0 {
            tracing::debug!("Exported {}/{}", count, articles.len());
        }
    }

    corpus.flush()?;
    urls.flush()?;

    tracing::info!("Exported {} documents", count);
    Ok(ExportReport { documents: count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::Source;
    use crate::storage::{content_fingerprint, DocType, NewDocument, SqliteStorage};

    fn store_article(storage: &mut SqliteStorage, url: &str, html: &str) {
        let hash = content_fingerprint(html);
        storage
            .record_document(&NewDocument {
                url,
                html,
                source: Source::Ria,
                doc_type: DocType::Article,
                hash: &hash,
                crawled_at: 1_700_000_000,
            })
            .unwrap();
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        let text = clean_text("<html><body><p>one\n  two</p><p>three</p></body></html>");
        assert_eq!(text, "one two three");
    }

    #[test]
    fn test_clean_text_drops_script_and_style() {
        let html = r#"
            <html><head><style>p { color: red; }</style></head>
            <body><script>var x = 1;</script><p>kept</p></body></html>
        "#;
        assert_eq!(clean_text(html), "kept");
    }

    #[test]
    fn test_clean_text_drops_page_chrome() {
        let html = r#"
            <html><body>
                <header>masthead</header>
                <nav><a href="/">home</a></nav>
                <p>story text</p>
                <footer>contacts</footer>
            </body></html>
        "#;
        assert_eq!(clean_text(html), "story text");
    }

    #[test]
    fn test_clean_text_keeps_nested_content() {
        let html = "<html><body><div><p>a <b>bold</b> word</p></div></body></html>";
        assert_eq!(clean_text(html), "a bold word");
    }

    #[test]
    fn test_export_writes_parallel_lines() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        store_article(&mut storage, "https://ria.ru/1", "<html><body>first</body></html>");
        store_article(&mut storage, "https://ria.ru/2", "<html><body>second</body></html>");

        let dir = tempfile::tempdir().unwrap();
        let report = export_corpus(&storage, dir.path()).unwrap();
        assert_eq!(report.documents, 2);

        let corpus = std::fs::read_to_string(dir.path().join("corpus.txt")).unwrap();
        let urls = std::fs::read_to_string(dir.path().join("urls.txt")).unwrap();

        assert_eq!(corpus, "first\nsecond\n");
        assert_eq!(urls, "https://ria.ru/1\nhttps://ria.ru/2\n");
    }

    #[test]
    fn test_export_skips_navigation_documents() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        store_article(&mut storage, "https://ria.ru/1", "<html><body>story</body></html>");

        let hash = content_fingerprint("nav");
        storage
            .record_document(&NewDocument {
                url: "https://ria.ru/index.html",
                html: "nav",
                source: Source::Ria,
                doc_type: DocType::Navigation,
                hash: &hash,
                crawled_at: 1_700_000_000,
            })
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let report = export_corpus(&storage, dir.path()).unwrap();

        assert_eq!(report.documents, 1);
    }
}
