//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Lowercase, trim and collapse internal whitespace runs to a single space.
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Words of at least `min_len` characters, lowercased, with surrounding
/// punctuation removed. Order of first appearance is kept; duplicates are
/// dropped.
pub fn significant_words(s: &str, min_len: usize) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for raw in s.split_whitespace() {
        let word = raw
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if word.chars().count() >= min_len && !words.contains(&word) {
            words.push(word);
        }
    }
    words
}
