//! Approximate text matching for purchase search.
//!
//! Query and candidate text are canonicalized the same way, checked for a
//! cheap substring hit, and otherwise compared word by word with a
//! normalized Levenshtein similarity. Tolerant of case, accents and small
//! typos.

use unicode_normalization::UnicodeNormalization;

/// Minimum per-word similarity for a fuzzy hit.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.6;

/// Canonicalize text for comparison: lowercase, NFD-decompose and strip
/// combining diacritics (U+0300–U+036F), turn `.` and `,` into spaces,
/// trim. Idempotent; applied to query and candidate alike so comparisons
/// stay symmetric.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .map(|c| if c == '.' || c == ',' { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Similarity between two strings in `[0, 1]`: `1.0` when equal after
/// normalization, `0.0` when exactly one side is empty, otherwise
/// `1 − levenshtein / max(len)` with unit-cost edits.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&normalize(a), &normalize(b))
}

/// Does `query` approximately match `text`?
///
/// Substring containment after normalization is an immediate hit.
/// Otherwise every query word must reach `threshold` similarity against
/// at least one text word, in any order: every term the user typed must
/// be approximately present somewhere in the target.
pub fn fuzzy_match(query: &str, text: &str, threshold: f64) -> bool {
    if query.is_empty() || text.is_empty() {
        return false;
    }

    let query_norm = normalize(query);
    let text_norm = normalize(text);

    if text_norm.contains(&query_norm) {
        return true;
    }

    let text_words: Vec<&str> = text_norm.split_whitespace().collect();

    query_norm.split_whitespace().all(|query_word| {
        text_words
            .iter()
            .any(|text_word| similarity(query_word, text_word) >= threshold)
    })
}

/// OR across candidate field values: true when any field matches.
pub fn fuzzy_search_fields<'a, I>(query: &str, fields: I, threshold: f64) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    fields
        .into_iter()
        .any(|field| fuzzy_match(query, field, threshold))
}
