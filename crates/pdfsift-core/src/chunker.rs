//! Sentence-bounded chunking with a soft word budget.

use crate::TOP_KEYWORDS;
use crate::keywords::extract_keywords;
use crate::types::Chunk;

/// Split normalized text into trimmed sentences.
///
/// A sentence ends at `.`, `?` or `!` followed by a space. The
/// terminator stays with its sentence; the separating space is dropped,
/// so joining the result with single spaces reproduces the input
/// sentence stream.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        current.push(chars[i]);

        if matches!(chars[i], '.' | '?' | '!')
            && i + 1 < chars.len()
            && chars[i + 1] == ' '
            && !current.trim().is_empty()
        {
            let sentence = std::mem::take(&mut current);
            sentences.push(sentence.trim().to_owned());
            // Skip the boundary space.
            i += 1;
        }

        i += 1;
    }

    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_owned());
    }

    sentences
}

/// Accumulates whole sentences into word-budgeted chunks.
///
/// The budget is a soft, exclusive target: a chunk closes before the
/// sentence that would bring it to `max_words` or beyond, and a single
/// oversized sentence becomes a chunk on its own rather than being
/// split.
#[derive(Debug, Clone)]
pub struct SentenceChunker {
    max_words: usize,
    top_keywords: usize,
}

impl SentenceChunker {
    #[must_use]
    pub fn new(max_words: usize) -> Self {
        Self {
            max_words,
            top_keywords: TOP_KEYWORDS,
        }
    }

    /// Override how many keywords each chunk reports.
    #[must_use]
    pub fn with_top_keywords(mut self, top_keywords: usize) -> Self {
        self.top_keywords = top_keywords;
        self
    }

    /// Chunk normalized text. Indices are 1-based and contiguous; every
    /// chunk carries its own keyword summary.
    #[must_use]
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let mut chunks: Vec<Chunk> = Vec::new();
        let mut current = String::new();
        let mut word_count = 0;

        for sentence in split_sentences(text) {
            let sentence_words = sentence.split_whitespace().count();

            if word_count + sentence_words < self.max_words {
                if current.is_empty() {
                    current = sentence;
                } else {
                    current.push(' ');
                    current.push_str(&sentence);
                }
                word_count += sentence_words;
            } else {
                if !current.is_empty() {
                    push_chunk(
                        &mut chunks,
                        std::mem::take(&mut current),
                        word_count,
                        self.top_keywords,
                    );
                }
                current = sentence;
                word_count = sentence_words;
            }
        }

        if !current.is_empty() {
            push_chunk(&mut chunks, current, word_count, self.top_keywords);
        }

        chunks
    }
}

fn push_chunk(chunks: &mut Vec<Chunk>, text: String, word_count: usize, top_keywords: usize) {
    let keywords = extract_keywords(&text, top_keywords);
    chunks.push(Chunk {
        chunk_index: chunks.len() + 1,
        text,
        word_count,
        keywords,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(SentenceChunker::new(100).chunk("").is_empty());
    }

    #[test]
    fn single_sentence_single_chunk() {
        let chunks = SentenceChunker::new(100).chunk("One small sentence.");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_index, 1);
        assert_eq!(chunks[0].text, "One small sentence.");
        assert_eq!(chunks[0].word_count, 3);
    }

    #[test]
    fn sentences_are_never_split() {
        let text = "Alpha beta gamma delta. Epsilon zeta eta theta. Iota kappa.";
        let chunks = SentenceChunker::new(5).chunk(text);
        for chunk in &chunks {
            // Each chunk text is a whole number of the original sentences.
            for sentence in split_sentences(&chunk.text) {
                assert!(text.contains(&sentence));
            }
        }
    }

    #[test]
    fn budget_is_exclusive() {
        // Two 5-word sentences with a budget of 10: 5 + 5 reaches the
        // budget exactly, which must close the first chunk.
        let text = "One two three four five. Six seven eight nine ten.";
        let chunks = SentenceChunker::new(10).chunk(text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].word_count, 5);
        assert_eq!(chunks[1].word_count, 5);
    }

    #[test]
    fn oversized_sentence_forms_own_chunk() {
        let long = (0..20).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ") + ".";
        let text = format!("Short one. {long} Short two.");
        let chunks = SentenceChunker::new(5).chunk(&text);
        assert!(chunks.iter().any(|c| c.word_count > 5));
        // The oversized sentence sits alone in its chunk.
        let big = chunks.iter().find(|c| c.word_count > 5).unwrap();
        assert_eq!(split_sentences(&big.text).len(), 1);
    }

    #[test]
    fn chunk_indices_contiguous_from_one() {
        let text = "A one. B two. C three. D four. E five. F six.";
        let chunks = SentenceChunker::new(4).chunk(text);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i + 1);
        }
    }

    #[test]
    fn concatenation_reproduces_sentence_stream() {
        let text = "First sentence here. Second one follows! Third, a question? Fourth closes.";
        let chunks = SentenceChunker::new(6).chunk(text);
        let rebuilt = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn chunk_keywords_come_from_chunk_text() {
        let sentence = "Neutron neutron neutron flux flux flux measurement measurement measurement.";
        let chunks = SentenceChunker::new(100).chunk(sentence);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].keywords.contains(&"neutron".to_owned()));
    }

    #[test]
    fn chunk_keyword_count_is_configurable() {
        let sentence = "Neutron neutron neutron flux flux flux measurement measurement measurement.";
        let chunks = SentenceChunker::new(100).with_top_keywords(1).chunk(sentence);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].keywords.len(), 1);
    }

    #[test]
    fn split_keeps_terminators() {
        let s = split_sentences("Is it so? Yes! Done.");
        assert_eq!(s, vec!["Is it so?", "Yes!", "Done."]);
    }

    #[test]
    fn split_without_trailing_space_keeps_tail() {
        let s = split_sentences("No terminator at all");
        assert_eq!(s, vec!["No terminator at all"]);
    }

    #[test]
    fn abbreviation_dot_still_splits() {
        // Known limitation of the boundary heuristic.
        let s = split_sentences("Dr. Smith agreed.");
        assert_eq!(s.len(), 2);
    }

    mod proptest_chunker {
        use super::*;
        use proptest::prelude::*;

        fn sentence_text() -> impl Strategy<Value = String> {
            proptest::collection::vec("[a-z]{1,8}( [a-z]{1,8}){0,12}[.!?]", 1..20)
                .prop_map(|v| v.join(" "))
        }

        proptest! {
            #[test]
            fn never_panics(text in "\\PC{0,800}", max_words in 1usize..200) {
                let _ = SentenceChunker::new(max_words).chunk(&text);
            }

            #[test]
            fn rebuild_matches_original(text in sentence_text(), max_words in 1usize..50) {
                let chunks = SentenceChunker::new(max_words).chunk(&text);
                let rebuilt = chunks
                    .iter()
                    .map(|c| c.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                prop_assert_eq!(rebuilt, text);
            }

            #[test]
            fn no_empty_chunks_and_counts_match(text in sentence_text(), max_words in 1usize..50) {
                for (i, chunk) in SentenceChunker::new(max_words).chunk(&text).iter().enumerate() {
                    prop_assert!(!chunk.text.is_empty());
                    prop_assert_eq!(chunk.chunk_index, i + 1);
                    prop_assert_eq!(chunk.word_count, chunk.text.split_whitespace().count());
                    prop_assert!(chunk.word_count >= 1);
                }
            }
        }
    }
}
