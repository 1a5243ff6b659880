// Colored terminal output for ranked keywords and tag analyses.
//
// Everything printed here goes to stdout; logs go to stderr so `--json`
// output stays clean.

use colored::Colorize;

use crate::tags::frequency::TagAnalysis;
use crate::trends::models::TrendRecord;
use crate::youtube::models::{format_duration, format_views, VideoSummary};

/// Display the ranked keyword table.
pub fn display_ranking(records: &[TrendRecord]) {
    if records.is_empty() {
        println!("No keyword returned usable trend data.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Trend Ranking ({} keywords) ===", records.len()).bold()
    );
    println!();
    println!(
        "  {:>4}  {:<50} {:>8}",
        "Rank".dimmed(),
        "Keyword".dimmed(),
        "Interest".dimmed(),
    );
    println!("  {}", "-".repeat(64).dimmed());

    for (i, record) in records.iter().enumerate() {
        println!(
            "  {:>4}. {:<50} {}",
            i + 1,
            record.keyword,
            colorize_interest(record.average_interest),
        );
    }
    println!();
}

/// Display the final summary block after a keyword-file run.
pub fn display_summary(summary: &str, timeframe: &str, char_limit: usize, output: &str) {
    println!("Results written to {}", output.bold());
    println!(
        "{}",
        format!("Most popular keywords ({timeframe}, up to {char_limit} characters):").bold()
    );
    println!("{summary}");
}

/// Display a tag analysis as two labelled lists with counts.
pub fn display_tag_analysis(analysis: &TagAnalysis) {
    println!("\n{}", "Most used tags:".bold());
    print_tag_counts(&analysis.common);
    println!("\n{}", "Unique tags:".bold());
    print_tag_counts(&analysis.unique);
}

/// Display the videos whose tags were analyzed.
pub fn display_videos(videos: &[VideoSummary]) {
    println!(
        "\n{}",
        "Analyzed Videos (Last Year, 4-20 min, Most Viewed):".bold()
    );
    if videos.is_empty() {
        println!("  {}", "(none)".dimmed());
        return;
    }
    for video in videos {
        println!("  {}", video.title);
        println!(
            "    {}",
            format!(
                "{} | {} views | {} | {}",
                format_duration(video.duration_secs),
                format_views(video.views),
                video.published_date(),
                video.url()
            )
            .dimmed()
        );
    }
}

fn print_tag_counts(tags: &[(String, u32)]) {
    if tags.is_empty() {
        println!("  {}", "(none)".dimmed());
        return;
    }
    for (tag, count) in tags {
        println!("  {} {}", tag, format!("({count})").dimmed());
    }
}

/// Colorize an average interest score (0 to 100).
fn colorize_interest(score: f64) -> colored::ColoredString {
    let text = format!("{score:>8.2}");
    if score >= 50.0 {
        text.green().bold()
    } else if score >= 20.0 {
        text.green()
    } else if score >= 5.0 {
        text.yellow()
    } else {
        text.dimmed()
    }
}
