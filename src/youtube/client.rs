// YouTube Data API v3 client.
//
// Two calls per title: `search` for candidate ids, then one batched `videos`
// call for duration, view count and tags. The search already asks for
// medium-length videos ordered by views; the 4 to 20 minute bound and the
// view ordering are applied again on the detailed results.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Months, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use super::models::{parse_iso_duration, select_videos, VideoSummary};

/// Default YouTube Data API root.
pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

const SEARCH_PATH: &str = "/search";
const VIDEOS_PATH: &str = "/videos";
const SEARCH_MAX_RESULTS: &str = "50";

/// API-key authenticated YouTube Data API client.
pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    /// Create a client pointing at the given API root.
    ///
    /// Pass a mock server URL in tests; production uses DEFAULT_YOUTUBE_BASE_URL.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// The most viewed 4 to 20 minute videos matching `title` published in
    /// the year before `now`, with their tags.
    pub async fn top_videos(&self, title: &str, now: DateTime<Utc>) -> Result<Vec<VideoSummary>> {
        let published_after = now
            .checked_sub_months(Months::new(12))
            .unwrap_or(now - chrono::Duration::days(365));

        let ids = self.search(title, published_after).await?;
        let videos = self.video_details(&ids).await?;
        let found = videos.len();
        let selected = select_videos(videos);

        info!(
            title,
            found,
            selected = selected.len(),
            tags = selected.iter().map(|v| v.tags.len()).sum::<usize>(),
            "Collected YouTube videos"
        );
        Ok(selected)
    }

    /// Video ids for a title search, most viewed first.
    pub async fn search(&self, title: &str, published_after: DateTime<Utc>) -> Result<Vec<String>> {
        let published_after = published_after.to_rfc3339_opts(SecondsFormat::Millis, true);
        let url = format!("{}{}", self.base_url, SEARCH_PATH);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "id,snippet"),
                ("q", title),
                ("type", "video"),
                ("maxResults", SEARCH_MAX_RESULTS),
                ("publishedAfter", published_after.as_str()),
                ("videoDuration", "medium"),
                ("order", "viewCount"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("YouTube search request failed")?;

        let search: SearchResponse = read_json(response, "search").await?;
        let ids: Vec<String> = search
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();

        debug!(title, results = ids.len(), "YouTube search");
        Ok(ids)
    }

    /// Duration, statistics and snippet for a batch of video ids.
    ///
    /// An empty batch makes no request.
    pub async fn video_details(&self, ids: &[String]) -> Result<Vec<VideoSummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        let url = format!("{}{}", self.base_url, VIDEOS_PATH);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "contentDetails,statistics,snippet"),
                ("id", joined.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("YouTube videos request failed")?;

        let details: VideosResponse = read_json(response, "videos").await?;
        Ok(details.items.into_iter().map(VideoSummary::from).collect())
    }
}

/// Check the status and deserialize the body.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response, endpoint: &str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("YouTube {endpoint} returned {status}: {body}");
    }

    response
        .json()
        .await
        .with_context(|| format!("Failed to parse YouTube {endpoint} response"))
}

// --- API response types ---

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    /// Absent for channel and playlist results
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideosResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    #[serde(default)]
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub content_details: ContentDetails,
    #[serde(default)]
    pub statistics: Statistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Absent when the uploader set no tags
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentDetails {
    /// ISO 8601, e.g. "PT12M3S"
    #[serde(default)]
    pub duration: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The API sends counts as decimal strings
    #[serde(default)]
    pub view_count: Option<String>,
}

impl From<VideoItem> for VideoSummary {
    fn from(item: VideoItem) -> Self {
        VideoSummary {
            duration_secs: parse_iso_duration(&item.content_details.duration),
            views: item
                .statistics
                .view_count
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            id: item.id,
            title: item.snippet.title,
            published_at: item.snippet.published_at,
            tags: item.snippet.tags,
        }
    }
}
