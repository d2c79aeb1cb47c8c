use super::embedder::{HashEmbedder, MiniLmEmbedder, TextEmbedder};

/// Factory for embedding backends, mirroring
/// [`DatabaseDriver`](crate::db::driver::DatabaseDriver).
///
/// `MiniLm` opens the real AllMiniLML6V2 model. `Hashed` opens the
/// deterministic offline embedder, selected with `ACERVO_EMBEDDER=hash`
/// for environments without model access.
pub enum EmbedderDriver {
    MiniLm,
    Hashed,
}

impl EmbedderDriver {
    /// Choose the backend from the `ACERVO_EMBEDDER` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var("ACERVO_EMBEDDER") {
            Ok(v) if v == "hash" => Self::Hashed,
            _ => Self::MiniLm,
        }
    }

    /// Open a new embedder instance for the selected backend.
    pub fn open(&self) -> anyhow::Result<Box<dyn TextEmbedder>> {
        match self {
            Self::MiniLm => Ok(Box::new(MiniLmEmbedder::new()?)),
            Self::Hashed => Ok(Box::new(HashEmbedder::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EMBEDDING_DIMENSION;

    #[test]
    fn hashed_driver_opens_offline() {
        let driver = EmbedderDriver::Hashed;
        let mut embedder = driver.open().unwrap();
        let v = embedder.embed_query("prueba").unwrap();
        assert_eq!(v.len(), EMBEDDING_DIMENSION);
    }
}
