/// Embedding dimension for AllMiniLML6V2.
pub const EMBEDDING_DIMENSION: usize = 384;

/// Maximum chunk size in characters for document splitting.
pub const CHUNK_MAX_CHARS: usize = 500;

/// Number of overlap characters between adjacent chunks.
pub const CHUNK_OVERLAP_CHARS: usize = 100;

/// Number of top-k passages returned by similarity search.
pub const TOP_K: usize = 3;

/// Minimum cosine similarity for a passage to count as relevant.
///
/// Similarity is `1 - cosine_distance`; passages at or below this
/// threshold are discarded before ranking.
pub const MIN_SIMILARITY: f64 = 0.1;
