// Google Trends implementation.
//
// There is no official public API. The web UI talks to two JSON endpoints:
// `explore` hands out a signed widget token for the interest-over-time chart,
// and `widgetdata/multiline` returns the series for that token. Both bodies
// start with an anti-hijacking prefix (")]}'") before the JSON. The API also
// rejects requests without the NID cookie that the landing page sets, so the
// client keeps a cookie jar and visits the landing page once.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use super::models::{InterestPoint, InterestSeries, TrendQuery};
use super::traits::TrendSource;

/// Default Google Trends host.
pub const DEFAULT_BASE_URL: &str = "https://trends.google.com";

const EXPLORE_PATH: &str = "/trends/api/explore";
const MULTILINE_PATH: &str = "/trends/api/widgetdata/multiline";
const TIMESERIES_WIDGET: &str = "TIMESERIES";

/// Unauthenticated Google Trends client.
pub struct GoogleTrendsClient {
    client: reqwest::Client,
    base_url: String,
    /// Interface language, e.g. "en-US"
    hl: String,
    /// Timezone offset in minutes, as the web UI sends it
    tz: i32,
    cookies: OnceCell<()>,
}

impl GoogleTrendsClient {
    /// Create a client pointing at the given base URL.
    ///
    /// Pass a mock server URL in tests; production uses DEFAULT_BASE_URL.
    pub fn new(base_url: &str, hl: &str, tz: i32, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; tagtrends/0.1)")
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            hl: hl.to_string(),
            tz,
            cookies: OnceCell::new(),
        })
    }

    /// Visit the landing page once so the cookie jar holds an NID cookie.
    ///
    /// Failure is logged and ignored: the data endpoints will report the real
    /// problem if the cookie turns out to be required.
    async fn ensure_cookies(&self, geo: &str) {
        self.cookies
            .get_or_init(|| async {
                let url = format!("{}/", self.base_url);
                match self.client.get(&url).query(&[("geo", geo)]).send().await {
                    Ok(resp) if resp.status().is_success() => {
                        debug!("Fetched Google Trends session cookie");
                    }
                    Ok(resp) => {
                        warn!(status = %resp.status(), "Cookie warm-up returned non-success");
                    }
                    Err(e) => {
                        warn!(error = %e, "Cookie warm-up request failed");
                    }
                }
            })
            .await;
    }

    /// Ask the explore endpoint for the interest-over-time widget of a query.
    async fn timeseries_widget(&self, query: &TrendQuery) -> Result<Widget> {
        let req = ExploreRequest {
            comparison_item: vec![ComparisonItem {
                keyword: &query.keyword,
                time: &query.timeframe,
                geo: &query.geo,
            }],
            category: 0,
            property: query.property.as_api_str(),
        };
        let req_json = serde_json::to_string(&req).context("Failed to encode explore request")?;
        let tz = self.tz.to_string();

        let url = format!("{}{}", self.base_url, EXPLORE_PATH);
        let response = self
            .client
            .post(&url)
            .query(&[("hl", self.hl.as_str()), ("tz", tz.as_str()), ("req", req_json.as_str())])
            .send()
            .await
            .context("Google Trends explore request failed")?;

        let explore: ExploreResponse = read_prefixed_json(response, "explore").await?;

        explore
            .widgets
            .into_iter()
            .find(|w| w.id == TIMESERIES_WIDGET)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Google Trends returned no {TIMESERIES_WIDGET} widget for '{}'",
                    query.keyword
                )
            })
    }

    /// Fetch the series behind a TIMESERIES widget.
    async fn multiline(&self, widget: &Widget) -> Result<Vec<TimelinePoint>> {
        let token = widget
            .token
            .as_deref()
            .context("TIMESERIES widget has no token")?;
        let req_json =
            serde_json::to_string(&widget.request).context("Failed to encode widget request")?;
        let tz = self.tz.to_string();

        let url = format!("{}{}", self.base_url, MULTILINE_PATH);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("hl", self.hl.as_str()),
                ("tz", tz.as_str()),
                ("req", req_json.as_str()),
                ("token", token),
            ])
            .send()
            .await
            .context("Google Trends multiline request failed")?;

        let data: MultilineResponse = read_prefixed_json(response, "multiline").await?;
        Ok(data.default.timeline_data)
    }
}

#[async_trait]
impl TrendSource for GoogleTrendsClient {
    async fn interest_over_time(&self, query: &TrendQuery) -> Result<InterestSeries> {
        self.ensure_cookies(&query.geo).await;

        let widget = self.timeseries_widget(query).await?;
        let timeline = self.multiline(&widget).await?;

        let points: Vec<InterestPoint> = timeline.into_iter().map(InterestPoint::from).collect();

        debug!(
            keyword = %query.keyword,
            points = points.len(),
            "Fetched interest over time"
        );

        Ok(InterestSeries {
            keyword: query.keyword.clone(),
            points,
        })
    }
}

/// Check the status, strip the ")]}'" prefix and deserialize the body.
async fn read_prefixed_json<T: DeserializeOwned>(
    response: reqwest::Response,
    endpoint: &str,
) -> Result<T> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        anyhow::bail!("Google Trends rate limited the {endpoint} request (429 Too Many Requests)");
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Google Trends {endpoint} returned {status}: {body}");
    }

    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to read Google Trends {endpoint} response"))?;
    parse_prefixed_json(&body)
        .with_context(|| format!("Failed to parse Google Trends {endpoint} response"))
}

/// Deserialize a body that may carry junk before the first JSON object.
pub fn parse_prefixed_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    let start = body
        .find('{')
        .context("Response body contains no JSON object")?;
    Ok(serde_json::from_str(&body[start..])?)
}

// --- Google Trends request/response types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExploreRequest<'a> {
    comparison_item: Vec<ComparisonItem<'a>>,
    category: u32,
    property: &'a str,
}

#[derive(Serialize)]
struct ComparisonItem<'a> {
    keyword: &'a str,
    time: &'a str,
    geo: &'a str,
}

/// Response from the explore endpoint.
#[derive(Debug, Deserialize)]
pub struct ExploreResponse {
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

/// One chart widget. Only TIMESERIES is used; its `request` is echoed back
/// verbatim to the multiline endpoint.
#[derive(Debug, Deserialize)]
pub struct Widget {
    pub id: String,
    pub token: Option<String>,
    #[serde(default)]
    pub request: serde_json::Value,
}

/// Response from the multiline endpoint.
#[derive(Debug, Deserialize)]
pub struct MultilineResponse {
    pub default: TimelineData,
}

#[derive(Debug, Deserialize)]
pub struct TimelineData {
    #[serde(rename = "timelineData", default)]
    pub timeline_data: Vec<TimelinePoint>,
}

/// One bucket of the chart. `value` and `hasData` hold one entry per
/// compared keyword; we always compare a single keyword.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub time: String,
    #[serde(default)]
    pub value: Vec<f64>,
    #[serde(default)]
    pub has_data: Vec<bool>,
    #[serde(default)]
    pub is_partial: bool,
}

impl From<TimelinePoint> for InterestPoint {
    fn from(p: TimelinePoint) -> Self {
        let time = p
            .time
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0));
        InterestPoint {
            time,
            value: p.value.first().copied().unwrap_or(0.0),
            has_data: p.has_data.first().copied().unwrap_or(false),
            is_partial: p.is_partial,
        }
    }
}
