use anyhow::Context;
use rusqlite::{Connection, params};
use serde::Serialize;

use crate::config::EMBEDDING_DIMENSION;
use crate::error::AcervoError;

/// A bibliography document as stored in the `documents` table.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}

/// Metadata for a document about to be ingested.
#[derive(Debug)]
pub struct NewDocument {
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
}

/// Insert a new document record and return its id.
///
/// A UNIQUE violation on the title column is reported as
/// [`AcervoError::DuplicateTitle`] so callers can surface the conflict
/// distinctly from other database failures.
pub fn insert_document(conn: &Connection, doc: &NewDocument) -> anyhow::Result<i64> {
    let result = conn.execute(
        "INSERT INTO documents (title, author, description) VALUES (?1, ?2, ?3)",
        params![doc.title, doc.author, doc.description],
    );

    match result {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_unique_violation(&e, "documents.title") => {
            Err(AcervoError::DuplicateTitle(doc.title.clone()).into())
        }
        Err(e) => Err(e).context("Failed to insert document"),
    }
}

fn is_unique_violation(err: &rusqlite::Error, column: &str) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, Some(msg)) => {
            e.code == rusqlite::ErrorCode::ConstraintViolation && msg.contains(column)
        }
        _ => false,
    }
}

/// List all documents in insertion order.
pub fn list_documents(conn: &Connection) -> anyhow::Result<Vec<Document>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, title, author, description, created_at
             FROM documents ORDER BY id",
        )
        .context("Failed to prepare list_documents query")?;

    let documents = stmt
        .query_map([], |row| {
            Ok(Document {
                id: row.get(0)?,
                title: row.get(1)?,
                author: row.get(2)?,
                description: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to list documents")?;

    Ok(documents)
}

/// Delete a document by id. Its chunks are removed by the foreign key
/// cascade. Reports [`AcervoError::DocumentNotFound`] when no row matches.
pub fn delete_document(conn: &Connection, id: i64) -> anyhow::Result<()> {
    let deleted = conn
        .execute("DELETE FROM documents WHERE id = ?1", params![id])
        .context("Failed to delete document")?;

    if deleted == 0 {
        return Err(AcervoError::DocumentNotFound(id).into());
    }
    Ok(())
}

/// Insert a batch of chunks with their embedding vectors for one document.
///
/// Every embedding must have exactly [`EMBEDDING_DIMENSION`] components;
/// a mismatch aborts the insert with [`AcervoError::DimensionMismatch`].
/// Returns the number of chunks stored.
pub fn insert_chunks(
    conn: &Connection,
    document_id: i64,
    contents: &[String],
    embeddings: &[Vec<f32>],
) -> anyhow::Result<usize> {
    anyhow::ensure!(
        contents.len() == embeddings.len(),
        "chunk/embedding count mismatch: {} chunks, {} embeddings",
        contents.len(),
        embeddings.len(),
    );

    let mut stmt = conn
        .prepare(
            "INSERT INTO chunks (document_id, content, embedding)
             VALUES (?1, ?2, vec_f32(?3))",
        )
        .context("Failed to prepare chunk insert")?;

    for (content, embedding) in contents.iter().zip(embeddings) {
        if embedding.len() != EMBEDDING_DIMENSION {
            return Err(AcervoError::DimensionMismatch {
                expected: EMBEDDING_DIMENSION,
                got: embedding.len(),
            }
            .into());
        }

        let embedding_json = serde_json::to_string(embedding)?;
        stmt.execute(params![document_id, content, embedding_json])
            .context("Failed to insert chunk")?;
    }

    Ok(contents.len())
}

/// Count the chunks belonging to one document.
pub fn count_chunks(conn: &Connection, document_id: i64) -> anyhow::Result<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT count(*) FROM chunks WHERE document_id = ?1",
            params![document_id],
            |row| row.get(0),
        )
        .context("Failed to count chunks")?;
    Ok(usize::try_from(count).unwrap_or(0))
}

/// A passage returned by vector similarity search.
#[derive(Debug)]
pub struct ChunkMatch {
    pub document_id: i64,
    pub content: String,
    /// Cosine similarity in `[-1, 1]`; higher means more alike.
    pub similarity: f64,
}

/// Search stored chunks by cosine similarity against a query embedding.
///
/// Similarity is computed as `1 - vec_distance_cosine(...)` by the
/// sqlite-vec extension; results below `min_similarity` are dropped and at
/// most `k` passages are returned, best first.
pub fn search_chunks(
    conn: &Connection,
    query_embedding: &[f32],
    k: usize,
    min_similarity: f64,
) -> anyhow::Result<Vec<ChunkMatch>> {
    if query_embedding.len() != EMBEDDING_DIMENSION {
        return Err(AcervoError::DimensionMismatch {
            expected: EMBEDDING_DIMENSION,
            got: query_embedding.len(),
        }
        .into());
    }

    let query_json = serde_json::to_string(query_embedding)?;

    let mut stmt = conn.prepare(
        "SELECT document_id, content,
                1.0 - vec_distance_cosine(embedding, vec_f32(?1)) AS similarity
         FROM chunks
         WHERE 1.0 - vec_distance_cosine(embedding, vec_f32(?1)) > ?2
         ORDER BY similarity DESC
         LIMIT ?3",
    )?;

    let results = stmt
        .query_map(
            params![query_json, min_similarity, k as i64],
            |row| {
                Ok(ChunkMatch {
                    document_id: row.get(0)?,
                    content: row.get(1)?,
                    similarity: row.get(2)?,
                })
            },
        )?
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to search chunks")?;

    Ok(results)
}
