//! Error types for pdfsift-core.

/// Errors that can occur while turning one document into a record.
///
/// Everything here is contained at the document level: the caller logs
/// and moves on to the next input, it never aborts a batch.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// IO error reading the input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be opened or parsed at all.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// Input exceeds the extraction collaborator's size gate.
    #[error("file too large: {0} bytes")]
    FileTooLarge(u64),
}

/// Result type alias using `DocumentError`.
pub type Result<T> = std::result::Result<T, DocumentError>;
