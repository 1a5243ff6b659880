// Labelled text export, the file format read back by the keyword loader.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use super::frequency::TagAnalysis;
use crate::youtube::models::VideoSummary;

/// Heading of the optional third section, one line per analyzed video.
pub const VIDEOS_HEADER: &str = "Analyzed Videos (Last Year, 4-20 min, Most Viewed):";

/// Render the analysis as "Common Tags:" / "Unique Tags:" sections, followed
/// by the analyzed videos when the tags came from YouTube.
pub fn render_export(analysis: &TagAnalysis, videos: &[VideoSummary]) -> String {
    let mut text = format!(
        "Common Tags:\n{}\n\nUnique Tags:\n{}\n",
        join_tags(&analysis.common),
        join_tags(&analysis.unique)
    );
    if !videos.is_empty() {
        text.push('\n');
        text.push_str(VIDEOS_HEADER);
        text.push('\n');
        for video in videos {
            text.push_str(&video.export_line());
            text.push('\n');
        }
    }
    text
}

fn join_tags(tags: &[(String, u32)]) -> String {
    tags.iter()
        .map(|(tag, _)| tag.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Timestamped export filename, e.g. `youtube-tags-2026-01-31T12-00-00-000Z.txt`.
pub fn default_export_path(now: DateTime<Utc>) -> PathBuf {
    let stamp = now
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
        .replace([':', '.'], "-");
    PathBuf::from(format!("youtube-tags-{stamp}.txt"))
}

/// Write the export to `path`, replacing any existing file.
pub fn write_export(analysis: &TagAnalysis, videos: &[VideoSummary], path: &Path) -> Result<()> {
    std::fs::write(path, render_export(analysis, videos))
        .with_context(|| format!("Failed to write tag export to {}", path.display()))?;
    info!(
        path = %path.display(),
        common = analysis.common.len(),
        unique = analysis.unique.len(),
        videos = videos.len(),
        "Wrote tag export"
    );
    Ok(())
}
