use anyhow::Context;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::config::{MIN_SIMILARITY, TOP_K};
use crate::db::queries::{self, ChunkMatch, Document, NewDocument};
use crate::embedding::embedder::TextEmbedder;
use crate::error::AcervoError;
use crate::pipeline::chunker::split_text;

/// Ingest one document into the bibliography.
///
/// 1. Validate title and text.
/// 2. Insert the document record (duplicate titles are a conflict).
/// 3. Split the text into chunks and embed them in one batch.
/// 4. Insert all chunks referencing the new document.
///
/// Steps 2 through 4 run in a single transaction, so a failure at any point
/// leaves no orphaned document behind. Returns the updated full listing.
pub fn ingest_document(
    conn: &mut Connection,
    embedder: &mut dyn TextEmbedder,
    meta: NewDocument,
    text: &str,
) -> anyhow::Result<Vec<Document>> {
    if meta.title.trim().is_empty() {
        return Err(AcervoError::MissingTitle.into());
    }
    if text.trim().is_empty() {
        return Err(AcervoError::EmptyDocument.into());
    }

    let tx = conn.transaction()?;

    let document_id = queries::insert_document(&tx, &meta)?;

    let chunks = split_text(text)?;
    debug!(document_id, chunks = chunks.len(), "Split document text");

    let refs: Vec<&str> = chunks.iter().map(String::as_str).collect();
    let embeddings = embedder
        .embed_documents(&refs)
        .with_context(|| format!("Failed to embed chunks for \"{}\"", meta.title))?;

    let stored = queries::insert_chunks(&tx, document_id, &chunks, &embeddings)?;
    tx.commit().context("Failed to commit ingestion")?;

    info!(document_id, chunks = stored, title = %meta.title, "Ingested document");

    queries::list_documents(conn)
}

/// Search the bibliography and return ranked passages with similarities.
pub fn search_matches(
    conn: &Connection,
    embedder: &mut dyn TextEmbedder,
    query: &str,
) -> anyhow::Result<Vec<ChunkMatch>> {
    let query_embedding = embedder
        .embed_query(query)
        .context("Failed to embed query")?;

    let matches = queries::search_chunks(conn, &query_embedding, TOP_K, MIN_SIMILARITY)?;
    debug!(results = matches.len(), "Similarity search complete");
    Ok(matches)
}

/// Search the bibliography and return the top passage contents, best first.
pub fn search(
    conn: &Connection,
    embedder: &mut dyn TextEmbedder,
    query: &str,
) -> anyhow::Result<Vec<String>> {
    let matches = search_matches(conn, embedder, query)?;
    Ok(matches.into_iter().map(|m| m.content).collect())
}
