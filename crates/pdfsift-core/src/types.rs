use serde::Serialize;

/// Extracted raw material for one document, before any core processing.
///
/// Immutable once produced by the extraction collaborator. A page that
/// could not be read contributes an empty string and keeps its slot so
/// the page count stays honest.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Where the document came from, typically a path.
    pub source: String,
    /// Per-page extracted text, in page order.
    pub pages: Vec<String>,
    /// Author string from the document's embedded metadata, if any.
    pub metadata_author: Option<String>,
}

impl RawDocument {
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Full document text: pages joined by newlines, trimmed.
    #[must_use]
    pub fn text(&self) -> String {
        self.pages.join("\n").trim().to_owned()
    }
}

/// How the final author value was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justification {
    /// Document at or under the page threshold; deduction skipped.
    TooShort,
    /// Metadata and filename candidates both verified; metadata wins.
    MetadataAndFilenameConfirmed,
    MetadataConfirmed,
    FilenameConfirmed,
    CombinationConfirmed,
    /// Metadata candidate exists but the oracle never confirmed it.
    MetadataUnconfirmed,
    /// Filename candidate exists but the oracle never confirmed it.
    FilenameUnconfirmed,
    NoAuthorFound,
}

impl std::fmt::Display for Justification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::TooShort => "too short",
            Self::MetadataAndFilenameConfirmed => {
                "metadata and filename confirmed (metadata prioritized)"
            }
            Self::MetadataConfirmed => "metadata confirmed",
            Self::FilenameConfirmed => "filename confirmed",
            Self::CombinationConfirmed => "combination confirmed",
            Self::MetadataUnconfirmed => "metadata (not confirmed)",
            Self::FilenameUnconfirmed => "filename (not confirmed)",
            Self::NoAuthorFound => "no author found",
        };
        f.write_str(s)
    }
}

/// Author placeholder when no candidate survives.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Final outcome of one author deduction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDecision {
    pub final_author: String,
    pub justification: Justification,
}

impl AuthorDecision {
    #[must_use]
    pub fn unknown(justification: Justification) -> Self {
        Self {
            final_author: UNKNOWN_AUTHOR.to_owned(),
            justification,
        }
    }
}

/// One sentence-aligned slice of the normalized document text.
#[derive(Debug, Clone, Serialize)]
pub struct Chunk {
    /// 1-based, contiguous across the document.
    pub chunk_index: usize,
    pub text: String,
    pub word_count: usize,
    pub keywords: Vec<String>,
}

/// The pipeline's sole output artifact, one per input document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecord {
    pub source: String,
    pub deduced_author: String,
    /// Human-readable justification for the deduced author.
    pub verification: String,
    pub top_keywords: Vec<String>,
    pub chunks: Vec<Chunk>,
}
