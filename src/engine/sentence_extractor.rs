use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_TERMINATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.?!]").expect("SENTENCE_TERMINATORS is a valid regex pattern"));

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("NON_ALPHANUMERIC is a valid regex pattern"));

/// Fragments with fewer tokens than this are not worth a question.
pub const MIN_SENTENCE_TOKENS: usize = 4;

/// Splits `text` into candidate sentences, in source order.
pub fn extract_sentences(text: &str) -> Vec<String> {
    SENTENCE_TERMINATORS
        .split(text)
        .map(str::trim)
        .filter(|fragment| fragment.split_whitespace().count() >= MIN_SENTENCE_TOKENS)
        .map(str::to_string)
        .collect()
}

/// Drops everything except ASCII letters and digits.
pub fn strip_non_alphanumeric(word: &str) -> String {
    NON_ALPHANUMERIC.replace_all(word, "").into_owned()
}

/// Re-joins an uploaded text file line by line with single spaces.
pub fn join_lines(raw: &str) -> String {
    raw.lines().collect::<Vec<_>>().join(" ").trim().to_string()
}
