// Keyword cleaning.
//
// Trend queries only make sense for short, plain tokens: punctuation, emoji
// and hashtags are stripped, whitespace is trimmed, and anything empty or
// longer than MAX_KEYWORD_CHARS is dropped.

use super::dedupe;

/// Longest keyword (in characters) we will send to the trends API.
pub const MAX_KEYWORD_CHARS: usize = 50;

/// Whether a character belongs to the word/whitespace class kept by the filter.
///
/// Letters are Unicode alphabetic characters, which include combining vowel
/// signs (Devanagari `ि`, `े`), so such words reach the trends API intact.
pub fn is_keyword_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c.is_whitespace()
}

/// Clean a single raw candidate.
///
/// Returns `None` when nothing usable is left or the result is too long.
pub fn clean_keyword(raw: &str) -> Option<String> {
    let stripped: String = raw.chars().filter(|&c| is_keyword_char(c)).collect();
    let cleaned = stripped.trim();
    let len = cleaned.chars().count();
    if len == 0 || len > MAX_KEYWORD_CHARS {
        return None;
    }
    Some(cleaned.to_string())
}

/// Clean every candidate and keep the survivors, first-seen order, no repeats.
pub fn filter_keywords<I, S>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    dedupe(
        candidates
            .into_iter()
            .filter_map(|raw| clean_keyword(raw.as_ref())),
    )
}
