use text_splitter::{ChunkConfig, TextSplitter};

use crate::config::{CHUNK_MAX_CHARS, CHUNK_OVERLAP_CHARS};

/// Split raw document text into overlapping retrieval chunks.
///
/// Boundaries prefer paragraph breaks, then sentences, then words; no chunk
/// exceeds [`CHUNK_MAX_CHARS`] characters, and adjacent chunks share up to
/// [`CHUNK_OVERLAP_CHARS`] characters of context. Whitespace-only input
/// produces an empty vector, not an error.
pub fn split_text(text: &str) -> anyhow::Result<Vec<String>> {
    let config = ChunkConfig::new(CHUNK_MAX_CHARS)
        .with_overlap(CHUNK_OVERLAP_CHARS)
        .map_err(|e| anyhow::anyhow!("Invalid chunk configuration: {e}"))?;
    let splitter = TextSplitter::new(config);
    Ok(splitter.chunks(text).map(str::to_string).collect())
}
