//! Multi-candidate author deduction with external verification.
//!
//! Candidates come from two independent sources, the document's embedded
//! metadata and its file name, plus adjacent-word combinations derived
//! from the file name. Each is checked against a [`VerificationOracle`]
//! constrained to known-person entries, then a fixed priority table
//! picks the final answer.

use std::future::Future;
use std::sync::LazyLock;

use regex::Regex;

use crate::SHORT_DOCUMENT_PAGES;
use crate::types::{AuthorDecision, Justification};

/// A capitalized word: one uppercase letter followed by lowercase ones.
static NAME_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z]+").expect("static regex must compile"));

/// Shortest metadata author string worth considering.
const MIN_METADATA_AUTHOR_LEN: usize = 4;

/// A resolved lookup from the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Title of the entry the query resolved to.
    pub title: String,
    /// Whether the entry describes a known person.
    pub known_person: bool,
}

/// External knowledge-base lookup, constrained to person entries when
/// `require_person` is set.
///
/// `None` is the single "unresolved" sentinel: empty result sets,
/// missing fields, and transport failures all collapse to it, so one
/// failed query never aborts a deduction run.
pub trait VerificationOracle: Send + Sync {
    fn verify(
        &self,
        query: &str,
        require_person: bool,
    ) -> impl Future<Output = Option<Verification>> + Send;
}

/// Provisional author names surfaced from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    /// Embedded-metadata author, already gated on length and on
    /// appearing in the document text.
    pub metadata: Option<String>,
    /// First two capitalized words of the file name, if present.
    pub filename: Option<String>,
    /// Adjacent capitalized-word pairs from the file name that occur in
    /// the document text, in original order.
    pub combination_seeds: Vec<String>,
}

/// Derive author candidates from embedded metadata and the file name.
///
/// `file_stem` is the file identifier with its extension already
/// stripped. `document_text` is the raw extracted text used for
/// containment gating.
#[must_use]
pub fn generate_candidates(
    metadata_author: Option<&str>,
    file_stem: &str,
    document_text: &str,
) -> Candidates {
    let text_lower = document_text.to_lowercase();

    let metadata = metadata_author.and_then(|raw| {
        let author = raw.trim();
        if author.chars().count() < MIN_METADATA_AUTHOR_LEN {
            tracing::debug!(author, "metadata author too short, ignoring");
            return None;
        }
        // Containment is the gate, not a ranking signal: a metadata
        // author absent from the text is discarded outright.
        if !text_lower.contains(&author.to_lowercase()) {
            tracing::debug!(author, "metadata author not present in document text");
            return None;
        }
        Some(author.to_owned())
    });

    let runs: Vec<&str> = NAME_RUN.find_iter(file_stem).map(|m| m.as_str()).collect();

    let filename = (runs.len() >= 2).then(|| format!("{} {}", runs[0], runs[1]));

    let combination_seeds = runs
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .filter(|phrase| text_lower.contains(&phrase.to_lowercase()))
        .collect();

    Candidates {
        metadata,
        filename,
        combination_seeds,
    }
}

/// Orchestrates candidate generation, verification, and the priority
/// table that produces the final [`AuthorDecision`].
pub struct AuthorDeductionEngine<O> {
    oracle: O,
}

impl<O: VerificationOracle> AuthorDeductionEngine<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Deduce the document's author.
    ///
    /// Short documents (`page_count <= 30`) short-circuit to
    /// "Unknown Author" before any candidate is generated or any oracle
    /// query issued.
    pub async fn deduce(
        &self,
        page_count: usize,
        metadata_author: Option<&str>,
        file_stem: &str,
        document_text: &str,
    ) -> AuthorDecision {
        if page_count <= SHORT_DOCUMENT_PAGES {
            tracing::info!(page_count, "document too short for attribution");
            return AuthorDecision::unknown(Justification::TooShort);
        }

        let candidates = generate_candidates(metadata_author, file_stem, document_text);

        let verified_metadata = match &candidates.metadata {
            Some(name) => self.candidate_verified(name).await,
            None => false,
        };
        let verified_filename = match &candidates.filename {
            Some(name) => self.candidate_verified(name).await,
            None => false,
        };

        let mut verified_combination = None;
        if !verified_metadata && !verified_filename {
            for seed in &candidates.combination_seeds {
                if self.seed_verified(seed).await {
                    verified_combination = Some(seed.clone());
                    break;
                }
            }
        }

        let (final_author, justification) = match (
            verified_metadata,
            verified_filename,
            verified_combination,
        ) {
            (true, true, _) => (
                candidates.metadata.clone(),
                Justification::MetadataAndFilenameConfirmed,
            ),
            (true, false, _) => (candidates.metadata.clone(), Justification::MetadataConfirmed),
            (false, true, _) => (
                candidates.filename.clone(),
                Justification::FilenameConfirmed,
            ),
            (false, false, Some(combo)) => (Some(combo), Justification::CombinationConfirmed),
            (false, false, None) => {
                if candidates.metadata.is_some() {
                    (candidates.metadata.clone(), Justification::MetadataUnconfirmed)
                } else if candidates.filename.is_some() {
                    (candidates.filename.clone(), Justification::FilenameUnconfirmed)
                } else {
                    (None, Justification::NoAuthorFound)
                }
            }
        };

        match final_author {
            Some(author) => {
                tracing::info!(%author, %justification, "author deduced");
                AuthorDecision {
                    final_author: author,
                    justification,
                }
            }
            None => AuthorDecision::unknown(justification),
        }
    }

    /// A candidate verifies when the oracle resolves it to a known
    /// person whose title contains the candidate.
    ///
    /// Containment stands in for identity here, as in the system this
    /// preserves compatibility with; an unrelated title that happens to
    /// contain the candidate will verify it.
    async fn candidate_verified(&self, candidate: &str) -> bool {
        match self.oracle.verify(candidate, true).await {
            Some(v) => {
                v.known_person && v.title.to_lowercase().contains(&candidate.to_lowercase())
            }
            None => false,
        }
    }

    /// A combination seed verifies when either of its two words appears
    /// in the resolved title.
    async fn seed_verified(&self, seed: &str) -> bool {
        let Some(v) = self.oracle.verify(seed, true).await else {
            return false;
        };
        if !v.known_person {
            return false;
        }
        let title = v.title.to_lowercase();
        seed.split_whitespace()
            .any(|half| title.contains(&half.to_lowercase()))
    }
}
