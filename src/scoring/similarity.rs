use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::constants::{MIN_PARTIAL_TOKEN_CHARS, SUBSTRING_DISCOUNT};

/// Lowercases and strips diacritics (`"Áudio"` → `"audio"`).
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Lexical similarity of `query` against `text`, in `[0, 1]`.
///
/// 1. Normalized containment of the whole query scores `1.0`.
/// 2. Otherwise the best of whole-token overlap and discounted partial-token overlap.
pub fn similarity(query: &str, text: &str) -> f32 {
    if text.is_empty() {
        return 0.0;
    }

    let query_norm = normalize_text(query);
    if query_norm.trim().is_empty() {
        return 0.0;
    }
    let text_norm = normalize_text(text);

    if text_norm.contains(query_norm.as_str()) {
        return 1.0;
    }

    let query_tokens: HashSet<&str> = query_norm.split_whitespace().collect();
    if query_tokens.is_empty() {
        return 0.0;
    }
    let text_tokens: HashSet<&str> = text_norm.split_whitespace().collect();
    let token_count = query_tokens.len() as f32;

    let whole_hits = query_tokens.intersection(&text_tokens).count() as f32;
    let word_score = whole_hits / token_count;

    let partial_hits = query_tokens
        .iter()
        .filter(|q| q.chars().count() > MIN_PARTIAL_TOKEN_CHARS)
        .filter(|q| {
            text_tokens
                .iter()
                .any(|t| t.contains(**q) || q.contains(*t))
        })
        .count() as f32;
    let substring_score = (partial_hits / token_count).min(1.0) * SUBSTRING_DISCOUNT;

    word_score.max(substring_score).clamp(0.0, 1.0)
}
