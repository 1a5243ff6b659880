// Output formatting: the ranked summary string and the plain tags file.

pub mod terminal;

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex_lite::Regex;
use tracing::info;

use crate::trends::models::TrendRecord;

/// Default character budget for the summary and the tags file.
pub const DEFAULT_CHAR_LIMIT: usize = 1000;

/// Default name of the plain keyword file.
pub const DEFAULT_TAGS_FILE: &str = "tags.txt";

const SEPARATOR: &str = ", ";

static SCORE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\(\d+\.\d+\)").expect("valid regex"));

/// Take at most `max_chars` characters from `text`.
///
/// Unlike byte slicing (`&text[..1000]`), this respects UTF-8 character
/// boundaries and will never panic on multi-byte characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Remove leading and trailing commas and spaces.
pub fn trim_separators(text: &str) -> &str {
    text.trim_matches(|c| c == ',' || c == ' ')
}

/// Join "keyword (score), " entries until the next one would overflow the
/// budget, then trim the trailing separator.
///
/// Entries are never cut: the first entry that does not fit ends the list.
pub fn format_trends(records: &[TrendRecord], char_limit: usize) -> String {
    let mut output = String::new();
    let mut output_chars = 0;

    for record in records {
        let entry = format!(
            "{} ({:.2}){SEPARATOR}",
            record.keyword, record.average_interest
        );
        let entry_chars = entry.chars().count();
        if output_chars + entry_chars > char_limit {
            break;
        }
        output.push_str(&entry);
        output_chars += entry_chars;
    }

    trim_separators(&output).to_string()
}

/// Drop the " (12.34)" score suffix from every entry.
pub fn strip_scores(formatted: &str) -> String {
    SCORE_SUFFIX_RE.replace_all(formatted, "").into_owned()
}

/// The plain keyword list written to the tags file.
pub fn plain_tags(formatted: &str, char_limit: usize) -> String {
    let plain = strip_scores(formatted);
    trim_separators(truncate_chars(&plain, char_limit)).to_string()
}

/// Write the plain keyword list to `path`, replacing any existing content.
///
/// Returns the text that was written.
pub fn save_tags(formatted: &str, path: &Path, char_limit: usize) -> Result<String> {
    let tags = plain_tags(formatted, char_limit);
    std::fs::write(path, &tags)
        .with_context(|| format!("Failed to write tags to {}", path.display()))?;
    info!(path = %path.display(), chars = tags.chars().count(), "Saved tags");
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_chars_short_string() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn truncate_chars_exact_length() {
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
    }

    #[test]
    fn trim_separators_both_ends() {
        assert_eq!(trim_separators(", a, b, "), "a, b");
        assert_eq!(trim_separators(",,, "), "");
    }

    #[test]
    fn strip_scores_only_removes_score_suffixes() {
        assert_eq!(
            strip_scores("cat (12.50), dog (3.00), top (10)"),
            "cat, dog, top (10)"
        );
    }
}
