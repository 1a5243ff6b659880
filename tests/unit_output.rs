// Unit tests for the summary formatter and the tags file writer.
//
// The formatter is a greedy prefix fill: it never exceeds the budget and
// never cuts an entry. The writer strips scores and persists the plain list.

use tagtrends::output::{format_trends, plain_tags, save_tags, strip_scores, DEFAULT_CHAR_LIMIT};
use tagtrends::trends::models::TrendRecord;

fn record(keyword: &str, score: f64) -> TrendRecord {
    TrendRecord {
        keyword: keyword.to_string(),
        average_interest: score,
    }
}

fn many_records(count: usize) -> Vec<TrendRecord> {
    (0..count)
        .map(|i| record(&format!("keyword number {i}"), 100.0 - i as f64 * 0.25))
        .collect()
}

// ============================================================
// format_trends
// ============================================================

#[test]
fn formats_two_decimals_in_given_order() {
    let records = vec![record("dog", 50.0), record("bird", 33.333), record("cat", 9.999)];
    assert_eq!(
        format_trends(&records, DEFAULT_CHAR_LIMIT),
        "dog (50.00), bird (33.33), cat (10.00)"
    );
}

#[test]
fn empty_records_format_to_empty_string() {
    assert_eq!(format_trends(&[], DEFAULT_CHAR_LIMIT), "");
}

#[test]
fn never_exceeds_the_budget() {
    for limit in [0, 1, 15, 16, 17, 100, 999, 1000] {
        let out = format_trends(&many_records(300), limit);
        assert!(
            out.chars().count() <= limit,
            "limit {limit} produced {} chars",
            out.chars().count()
        );
    }
}

#[test]
fn never_splits_an_entry() {
    let records = many_records(300);
    let out = format_trends(&records, DEFAULT_CHAR_LIMIT);
    let entries: Vec<&str> = out.split(", ").collect();
    for (entry, record) in entries.iter().zip(&records) {
        assert_eq!(
            *entry,
            format!("{} ({:.2})", record.keyword, record.average_interest)
        );
    }
}

#[test]
fn entry_that_exactly_fills_the_budget_is_kept() {
    // "ab (1.00), " is 11 characters
    let records = vec![record("ab", 1.0), record("cd", 0.5)];
    assert_eq!(format_trends(&records, 11), "ab (1.00)");
    assert_eq!(format_trends(&records, 10), "");
    assert_eq!(format_trends(&records, 22), "ab (1.00), cd (0.50)");
}

#[test]
fn stops_at_first_entry_that_does_not_fit() {
    // The long entry does not fit; the short one after it is not tried
    let records = vec![
        record("a", 3.0),
        record(&"l".repeat(40), 2.0),
        record("b", 1.0),
    ];
    assert_eq!(format_trends(&records, 30), "a (3.00)");
}

#[test]
fn budget_counts_characters_not_bytes() {
    // "ü (1.00), " is 10 characters but 11 bytes
    let records = vec![record("ü", 1.0)];
    assert_eq!(format_trends(&records, 10), "ü (1.00)");
}

// ============================================================
// strip_scores / plain_tags / save_tags
// ============================================================

#[test]
fn strip_scores_removes_every_suffix() {
    assert_eq!(
        strip_scores("dog (50.00), bird (30.00), cat (10.00)"),
        "dog, bird, cat"
    );
}

#[test]
fn plain_tags_truncates_and_trims() {
    let formatted = "alpha (1.00), beta (2.00), gamma (3.00)";
    // "alpha, beta, gamma" cut to 13 chars is "alpha, beta, "
    assert_eq!(plain_tags(formatted, 13), "alpha, beta");
}

#[test]
fn save_then_read_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tags.txt");

    let formatted = format_trends(&many_records(300), DEFAULT_CHAR_LIMIT);
    let written = save_tags(&formatted, &path, DEFAULT_CHAR_LIMIT).unwrap();
    let read_back = std::fs::read_to_string(&path).unwrap();

    assert_eq!(read_back, written);
    assert_eq!(read_back, plain_tags(&formatted, DEFAULT_CHAR_LIMIT));
    assert!(read_back.chars().count() <= DEFAULT_CHAR_LIMIT);
    assert!(!read_back.contains('('));
    assert!(read_back.starts_with("keyword number 0, keyword number 1"));
}

#[test]
fn save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tags.txt");
    std::fs::write(&path, "old old old old old old").unwrap();

    save_tags("new (1.00)", &path, DEFAULT_CHAR_LIMIT).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
}

#[test]
fn save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("tags.txt");
    assert!(save_tags("a (1.00)", &path, DEFAULT_CHAR_LIMIT).is_err());
}
