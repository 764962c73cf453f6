use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word pattern should be valid"));

/// Splits text into lower-cased word tokens.
///
/// A word is a maximal run of Unicode word characters (letters, digits and
/// underscore). Everything else is a delimiter. Tokens are returned in order
/// of appearance and repeat once per occurrence.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD.find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Counts how many times each token occurs in `text`.
pub fn term_frequencies(text: &str) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}
