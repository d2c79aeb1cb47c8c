use anyhow::Context;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use sha2::{Digest, Sha256};

use crate::config::EMBEDDING_DIMENSION;

/// Converts text into fixed-length vectors for similarity search.
///
/// Implementations are deterministic for a fixed model version and preserve
/// input order: `embed_documents` returns exactly one vector per input
/// string. There is no caching layer; every call recomputes.
pub trait TextEmbedder {
    /// Embed a batch of document chunks.
    fn embed_documents(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>>;

    /// Embed a single query string.
    fn embed_query(&mut self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.embed_documents(std::slice::from_ref(&text))?
            .pop()
            .context("Embedding model returned no vector for query")
    }
}

/// Production embedder wrapping fastembed's AllMiniLML6V2 model (384-dim).
pub struct MiniLmEmbedder {
    model: TextEmbedding,
}

impl MiniLmEmbedder {
    /// Initialize the embedding model. Downloads model files into the
    /// fastembed cache on first use; a load failure is fatal.
    pub fn new() -> anyhow::Result<Self> {
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false),
        )
        .context("Failed to initialize embedding model")?;
        Ok(Self { model })
    }
}

impl TextEmbedder for MiniLmEmbedder {
    fn embed_documents(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let owned: Vec<String> = texts.iter().map(|s| (*s).to_string()).collect();
        self.model.embed(owned, None).context("Failed to embed texts")
    }
}

/// Deterministic offline embedder for tests and network-free environments.
///
/// Each token maps to a pseudo-random direction derived from its SHA-256
/// digest; a text's vector is the normalized sum over its tokens. Texts that
/// share tokens therefore get positive cosine similarity, which is enough
/// for retrieval smoke use, while unrelated texts stay near orthogonal.
pub struct HashEmbedder;

impl HashEmbedder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn embed_text(text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        let mut acc = vec![0.0_f32; EMBEDDING_DIMENSION];
        let mut tokens = 0_usize;

        for token in lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            add_token_vector(&mut acc, token);
            tokens += 1;
        }

        // Whitespace-only text still gets a stable non-zero vector.
        if tokens == 0 {
            add_token_vector(&mut acc, "");
        }

        normalize(&mut acc);
        acc
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEmbedder for HashEmbedder {
    fn embed_documents(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::embed_text(t)).collect())
    }
}

/// Accumulate the token's hash-derived direction into `acc`.
///
/// The 384 components come from 12 SHA-256 digests of `token` salted with a
/// block counter, each byte mapped into `[-1, 1]`.
fn add_token_vector(acc: &mut [f32], token: &str) {
    debug_assert_eq!(acc.len(), EMBEDDING_DIMENSION);
    for block in 0..EMBEDDING_DIMENSION / 32 {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hasher.update([block as u8]);
        let digest = hasher.finalize();
        for (i, byte) in digest.iter().enumerate() {
            acc[block * 32 + i] += (f32::from(*byte) / 255.0) * 2.0 - 1.0;
        }
    }
}

fn normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
