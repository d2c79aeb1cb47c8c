use crate::context::AcervoContext;
use crate::db::driver::DatabaseDriver;
use crate::embedding::driver::EmbedderDriver;

/// Immutable dependency bundle for acervo commands.
///
/// Bundles the project context, database driver, and embedding driver so
/// that all command handlers receive a single `&Runtime` parameter instead
/// of individual dependencies. Connections and embedding models are opened
/// per command through the drivers.
pub struct Runtime {
    pub context: AcervoContext,
    pub db: DatabaseDriver,
    pub embedder: EmbedderDriver,
}
