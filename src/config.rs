use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::output::{DEFAULT_CHAR_LIMIT, DEFAULT_TAGS_FILE};
use crate::trends::google::DEFAULT_BASE_URL;
use crate::trends::models::{Property, QuerySettings};
use crate::trends::throttle::DEFAULT_DELAY;
use crate::youtube::client::DEFAULT_YOUTUBE_BASE_URL;

/// Central configuration loaded from environment variables.
///
/// Every value has a default. The one secret, the YouTube API key, is only
/// needed by `tags --title`. The .env file is loaded automatically at
/// startup via dotenvy.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Google Trends host (override to point at a mirror or a mock)
    pub base_url: String,
    /// Interface language sent as `hl`
    pub hl: String,
    /// Timezone offset in minutes sent as `tz`
    pub tz: i32,
    /// Timeframe, region and property of every query
    pub query: QuerySettings,
    /// Pause before each trends request
    pub delay: Duration,
    /// Per-request HTTP timeout
    pub timeout: Duration,
    /// Character budget for the summary and the tags file
    pub char_limit: usize,
    /// Where the plain keyword list is written
    pub output_path: String,
    /// YouTube Data API key (empty when unset)
    pub youtube_api_key: String,
    /// YouTube Data API root (override to point at a mock)
    pub youtube_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            hl: "en-US".to_string(),
            tz: 360,
            query: QuerySettings::default(),
            delay: DEFAULT_DELAY,
            timeout: Duration::from_secs(30),
            char_limit: DEFAULT_CHAR_LIMIT,
            output_path: DEFAULT_TAGS_FILE.to_string(),
            youtube_api_key: String::new(),
            youtube_base_url: DEFAULT_YOUTUBE_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, falling back to defaults
    /// for unset keys. Malformed values are errors, not silent defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let property = match lookup("TAGTRENDS_PROPERTY") {
            Some(raw) => raw
                .parse::<Property>()
                .context("Invalid TAGTRENDS_PROPERTY")?,
            None => defaults.query.property,
        };

        let tz = parse_var(&lookup, "TAGTRENDS_TZ")?.unwrap_or(defaults.tz);
        let delay = parse_var::<f64, _>(&lookup, "TAGTRENDS_DELAY_SECS")?
            .map(seconds)
            .transpose()?
            .unwrap_or(defaults.delay);
        let timeout = parse_var::<f64, _>(&lookup, "TAGTRENDS_TIMEOUT_SECS")?
            .map(seconds)
            .transpose()?
            .unwrap_or(defaults.timeout);
        let char_limit =
            parse_var(&lookup, "TAGTRENDS_CHAR_LIMIT")?.unwrap_or(defaults.char_limit);

        Ok(Self {
            base_url: lookup("TAGTRENDS_BASE_URL").unwrap_or(defaults.base_url),
            hl: lookup("TAGTRENDS_HL").unwrap_or(defaults.hl),
            tz,
            query: QuerySettings {
                timeframe: lookup("TAGTRENDS_TIMEFRAME").unwrap_or(defaults.query.timeframe),
                geo: lookup("TAGTRENDS_GEO").unwrap_or(defaults.query.geo),
                property,
            },
            delay,
            timeout,
            char_limit,
            output_path: lookup("TAGTRENDS_OUTPUT").unwrap_or(defaults.output_path),
            youtube_api_key: lookup("TAGTRENDS_YOUTUBE_API_KEY")
                .or_else(|| lookup("YOUTUBE_API_KEY"))
                .unwrap_or(defaults.youtube_api_key),
            youtube_base_url: lookup("TAGTRENDS_YOUTUBE_BASE_URL")
                .unwrap_or(defaults.youtube_base_url),
        })
    }

    /// Check that the YouTube API key is configured.
    pub fn require_youtube(&self) -> Result<()> {
        if self.youtube_api_key.is_empty() {
            anyhow::bail!(
                "TAGTRENDS_YOUTUBE_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}

/// Parse an optional variable, reporting which key was malformed.
fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid {key}: '{raw}'"))
        })
        .transpose()
}

/// Convert a seconds value into a Duration, rejecting negatives and NaN.
pub fn seconds(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs)
        .with_context(|| format!("Expected a non-negative number of seconds, got {secs}"))
}
