// Video selection and the formatting used by the tag export.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex_lite::Regex;
use serde::Serialize;

/// Shortest video kept, in seconds (4 minutes).
pub const MIN_DURATION_SECS: u64 = 240;
/// Longest video kept, in seconds (20 minutes).
pub const MAX_DURATION_SECS: u64 = 1200;
/// How many of the most viewed videos contribute tags.
pub const MAX_VIDEOS: usize = 10;

static ISO_DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("valid regex")
});

/// One analyzed video.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub duration_secs: u64,
    pub views: u64,
    pub published_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl VideoSummary {
    pub fn url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }

    /// Publication date as YYYY-MM-DD, or "unknown".
    pub fn published_date(&self) -> String {
        self.published_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// One export line: `title - m:ss - 1.2M views - Published: date - url`.
    pub fn export_line(&self) -> String {
        format!(
            "{} - {} - {} views - Published: {} - {}",
            self.title,
            format_duration(self.duration_secs),
            format_views(self.views),
            self.published_date(),
            self.url()
        )
    }
}

/// Seconds in an ISO 8601 `PT#H#M#S` duration. Anything else counts as zero.
pub fn parse_iso_duration(duration: &str) -> u64 {
    let Some(caps) = ISO_DURATION_RE.captures(duration) else {
        return 0;
    };
    let part = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };
    part(1) * 3600 + part(2) * 60 + part(3)
}

/// `m:ss`, minutes unbounded (a 1h05m video is "65:00").
pub fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Compact view count: 1.2M, 3.4K, or the plain number below a thousand.
pub fn format_views(views: u64) -> String {
    if views >= 1_000_000 {
        format!("{:.1}M", views as f64 / 1_000_000.0)
    } else if views >= 1_000 {
        format!("{:.1}K", views as f64 / 1_000.0)
    } else {
        views.to_string()
    }
}

/// Keep 4 to 20 minute videos, most viewed first, at most `MAX_VIDEOS`.
///
/// Equal view counts keep the order the API returned them in.
pub fn select_videos(mut videos: Vec<VideoSummary>) -> Vec<VideoSummary> {
    videos.retain(|v| (MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&v.duration_secs));
    videos.sort_by(|a, b| b.views.cmp(&a.views));
    videos.truncate(MAX_VIDEOS);
    videos
}

/// Every tag of every video, in video order, repeats included.
pub fn collect_tags(videos: &[VideoSummary]) -> Vec<String> {
    videos.iter().flat_map(|v| v.tags.iter().cloned()).collect()
}
