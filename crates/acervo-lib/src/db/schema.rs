use rusqlite::Connection;
use rusqlite_migration::{M, Migrations};

/// Define all schema migrations.
///
/// `chunks.embedding` holds a 384-dim float32 vector encoded by sqlite-vec;
/// deleting a document removes its chunks through the foreign key cascade.
fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(
        "CREATE TABLE documents (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            title        TEXT NOT NULL UNIQUE,
            author       TEXT,
            description  TEXT,
            created_at   TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE chunks (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            document_id  INTEGER NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
            content      TEXT NOT NULL,
            embedding    BLOB NOT NULL,
            created_at   TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_chunks_document
            ON chunks(document_id);",
    )])
}

/// Apply all pending migrations to the database.
pub fn apply_migrations(conn: &mut Connection) -> anyhow::Result<()> {
    migrations()
        .to_latest(conn)
        .map_err(|e| anyhow::anyhow!("Failed to apply migrations: {e}"))?;
    Ok(())
}
