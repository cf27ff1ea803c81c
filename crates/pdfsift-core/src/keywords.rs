//! Frequency-based keyword extraction.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::stopwords;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("static regex must compile"));

/// A token must occur at least this often to count as a keyword.
pub const MIN_KEYWORD_FREQ: usize = 3;

/// Extract up to `top_n` salient words from `text`.
///
/// Tokens are lowercased alphanumeric runs; stopwords (English and
/// Turkish combined) and tokens three characters or shorter are
/// discarded, as is anything occurring fewer than
/// [`MIN_KEYWORD_FREQ`] times. Remaining tokens are ranked by
/// descending frequency; equal frequencies keep first-occurrence order
/// (stable sort over the first-seen sequence), which is the documented
/// tie-break. May return fewer than `top_n` items, or none.
#[must_use]
pub fn extract_keywords(text: &str, top_n: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for m in WORD.find_iter(text) {
        let token = m.as_str().to_lowercase();
        if token.chars().count() <= 3 || stopwords::is_stopword(&token) {
            continue;
        }
        match counts.get_mut(&token) {
            Some(n) => *n += 1,
            None => {
                counts.insert(token.clone(), 1);
                first_seen.push(token);
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = first_seen
        .into_iter()
        .filter_map(|token| {
            let freq = counts[&token];
            (freq >= MIN_KEYWORD_FREQ).then_some((token, freq))
        })
        .collect();
    // Stable sort: ties stay in first-occurrence order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);
    ranked.into_iter().map(|(token, _)| token).collect()
}
