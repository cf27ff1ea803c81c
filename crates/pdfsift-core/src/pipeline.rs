//! Top-level per-document orchestration.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use crate::TOP_KEYWORDS;
use crate::author::{AuthorDeductionEngine, VerificationOracle};
use crate::chunker::SentenceChunker;
use crate::error::DocumentError;
use crate::keywords::extract_keywords;
use crate::normalize::normalize;
use crate::types::{DocumentRecord, RawDocument};

/// Extraction collaborator: turns a document path into raw per-page
/// text plus embedded metadata.
///
/// Implementations must keep failures local: an unreadable page
/// contributes an empty string, and only a document that cannot be
/// opened at all is an `Err`.
pub trait DocumentExtractor: Send + Sync {
    fn extract(
        &self,
        path: &Path,
    ) -> Pin<Box<dyn Future<Output = Result<RawDocument, DocumentError>> + Send + '_>>;
}

/// Runs one document through deduction, keyword summary, and chunking.
///
/// Every failure is contained at the document level: the pipeline
/// yields `None` for that document and the caller moves on.
pub struct DocumentPipeline<O> {
    engine: AuthorDeductionEngine<O>,
    chunker: SentenceChunker,
    top_keywords: usize,
}

impl<O: VerificationOracle> DocumentPipeline<O> {
    #[must_use]
    pub fn new(oracle: O, max_chunk_words: usize) -> Self {
        Self {
            engine: AuthorDeductionEngine::new(oracle),
            chunker: SentenceChunker::new(max_chunk_words),
            top_keywords: TOP_KEYWORDS,
        }
    }

    /// Override how many keywords the record and each chunk report.
    #[must_use]
    pub fn with_top_keywords(mut self, top_keywords: usize) -> Self {
        self.top_keywords = top_keywords;
        self.chunker = self.chunker.with_top_keywords(top_keywords);
        self
    }

    /// Process one document, returning its record or `None` when the
    /// document could not be read or carries no text.
    pub async fn process(
        &self,
        extractor: &dyn DocumentExtractor,
        path: &Path,
    ) -> Option<DocumentRecord> {
        let raw = match extractor.extract(path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable document");
                return None;
            }
        };

        let text = raw.text();
        if text.is_empty() {
            tracing::info!(path = %path.display(), "document has no extractable text, skipping");
            return None;
        }

        let file_stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();

        let decision = self
            .engine
            .deduce(
                raw.page_count(),
                raw.metadata_author.as_deref(),
                file_stem,
                &text,
            )
            .await;

        let top_keywords = extract_keywords(&text, self.top_keywords);
        let chunks = self.chunker.chunk(&normalize(&text));

        Some(DocumentRecord {
            source: raw.source,
            deduced_author: decision.final_author,
            verification: decision.justification.to_string(),
            top_keywords,
            chunks,
        })
    }
}
