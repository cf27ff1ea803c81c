//! Core decision logic: normalization, keyword extraction, sentence
//! chunking, and multi-source author deduction with external verification.

pub mod author;
pub mod chunker;
pub mod error;
pub mod keywords;
pub mod normalize;
pub mod pipeline;
mod stopwords;
pub mod types;

pub use author::{
    AuthorDeductionEngine, Candidates, Verification, VerificationOracle, generate_candidates,
};
pub use chunker::SentenceChunker;
pub use error::DocumentError;
pub use keywords::extract_keywords;
pub use normalize::normalize;
pub use pipeline::{DocumentExtractor, DocumentPipeline};
pub use types::{AuthorDecision, Chunk, DocumentRecord, Justification, RawDocument};

/// Documents with this many pages or fewer are never attributed.
pub const SHORT_DOCUMENT_PAGES: usize = 30;

/// Keywords reported per document and per chunk.
pub const TOP_KEYWORDS: usize = 5;

/// Default soft word budget for one chunk.
pub const DEFAULT_MAX_CHUNK_WORDS: usize = 300;
