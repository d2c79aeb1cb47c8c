use std::path::{Path, PathBuf};

use acervo_lib::context::AcervoContext;
use acervo_lib::db::driver::DatabaseDriver;
use acervo_lib::db::queries::{self, NewDocument};
use acervo_lib::embedding::driver::EmbedderDriver;
use acervo_lib::pipeline::ingest::ingest_document;
use acervo_lib::runtime::Runtime;

/// Build a runtime backed by a named in-memory database and the offline
/// embedder. The temp dir provides a project root for context paths.
pub fn runtime_in_memory(name: &str) -> (tempfile::TempDir, Runtime) {
    let tmp = tempfile::tempdir().unwrap();
    let context = AcervoContext::new(tmp.path().to_path_buf());
    let db = DatabaseDriver::in_memory(name).unwrap();
    let runtime = Runtime {
        context,
        db,
        embedder: EmbedderDriver::Hashed,
    };
    (tmp, runtime)
}

/// Build a runtime whose database file does not exist yet.
pub fn runtime_not_initialized() -> (tempfile::TempDir, Runtime) {
    let tmp = tempfile::tempdir().unwrap();
    let context = AcervoContext::new(tmp.path().to_path_buf());
    let db = DatabaseDriver::file(context.db_path());
    let runtime = Runtime {
        context,
        db,
        embedder: EmbedderDriver::Hashed,
    };
    (tmp, runtime)
}

/// Write a document file into `dir` and return its path.
pub fn write_document(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Ingest a text document directly through the pipeline and return its id.
pub fn add_text_document(runtime: &Runtime, title: &str, text: &str) -> i64 {
    let mut conn = runtime.db.open().unwrap();
    let mut embedder = runtime.embedder.open().unwrap();

    let documents = ingest_document(
        &mut conn,
        embedder.as_mut(),
        NewDocument {
            title: title.to_string(),
            author: None,
            description: None,
        },
        text,
    )
    .unwrap();

    documents.last().unwrap().id
}

/// Count every chunk across all documents.
pub fn total_chunks(runtime: &Runtime) -> usize {
    let conn = runtime.db.open().unwrap();
    queries::list_documents(&conn)
        .unwrap()
        .iter()
        .map(|d| queries::count_chunks(&conn, d.id).unwrap())
        .sum()
}
