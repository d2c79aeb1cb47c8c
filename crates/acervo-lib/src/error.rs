use thiserror::Error;

/// Typed failures surfaced by ingestion, retrieval, and deletion.
///
/// Carried inside `anyhow::Error` so callers that only report a message can
/// stay generic, while the CLI and tests can `downcast_ref` to distinguish
/// validation problems, title conflicts, and missing documents.
#[derive(Debug, Error)]
pub enum AcervoError {
    #[error("a document titled \"{0}\" already exists")]
    DuplicateTitle(String),

    #[error("document {0} not found")]
    DocumentNotFound(i64),

    #[error("document title must not be empty")]
    MissingTitle,

    #[error("document text is empty")]
    EmptyDocument,

    #[error("unsupported document format: .{0}")]
    UnsupportedFormat(String),

    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = AcervoError::DuplicateTitle("Guía A".to_string());
        assert_eq!(err.to_string(), "a document titled \"Guía A\" already exists");

        let err = AcervoError::DocumentNotFound(42);
        assert_eq!(err.to_string(), "document 42 not found");
    }

    #[test]
    fn downcast_through_anyhow() {
        let err: anyhow::Error = AcervoError::MissingTitle.into();
        assert!(matches!(
            err.downcast_ref::<AcervoError>(),
            Some(AcervoError::MissingTitle)
        ));
    }
}
