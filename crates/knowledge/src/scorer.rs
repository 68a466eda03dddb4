//! Keyword-overlap relevance scoring.

use regex_lite::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("word pattern is a valid regex"));

/// Bonus added when the whole query appears verbatim in the text.
const PHRASE_BONUS: f64 = 0.5;

fn words(text: &str) -> impl Iterator<Item = &str> {
    WORD.find_iter(text).map(|m| m.as_str())
}

/// Score how well `text` answers `query`, in `[0, 1]`.
///
/// The fraction of query keywords (words longer than two characters) that
/// also occur in the text, plus a bonus when the lowercased query is a
/// substring of the lowercased text.
pub fn relevance(query: &str, text: &str) -> f64 {
    let query = query.to_lowercase();
    let text = text.to_lowercase();

    let keywords: HashSet<&str> = words(&query).filter(|w| w.chars().count() > 2).collect();
    if keywords.is_empty() {
        return 0.0;
    }

    let text_words: HashSet<&str> = words(&text).collect();
    let common = keywords.intersection(&text_words).count();
    let mut score = common as f64 / keywords.len() as f64;

    if text.contains(&query) {
        score = (score + PHRASE_BONUS).min(1.0);
    }

    score
}
