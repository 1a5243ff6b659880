// Data types shared between the trend source, the analyzer and the formatter.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Google search property a query is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Property {
    /// Plain web search
    Web,
    Images,
    News,
    /// YouTube search (default: the tags come from YouTube videos)
    #[default]
    YouTube,
    /// Google Shopping, still called "froogle" by the API
    Shopping,
}

impl Property {
    /// The `property` value Google Trends expects in the explore request.
    pub fn as_api_str(self) -> &'static str {
        match self {
            Property::Web => "",
            Property::Images => "images",
            Property::News => "news",
            Property::YouTube => "youtube",
            Property::Shopping => "froogle",
        }
    }
}

impl FromStr for Property {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "web" => Ok(Property::Web),
            "images" => Ok(Property::Images),
            "news" => Ok(Property::News),
            "youtube" => Ok(Property::YouTube),
            "froogle" | "shopping" => Ok(Property::Shopping),
            other => anyhow::bail!(
                "Unknown trends property '{other}' (expected web, images, news, youtube or froogle)"
            ),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Property::Web => "web",
            other => other.as_api_str(),
        };
        f.write_str(name)
    }
}

/// The fixed part of every query: time window, region and property.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySettings {
    /// Google Trends timeframe expression, e.g. "today 12-m"
    pub timeframe: String,
    /// ISO country code, e.g. "US"
    pub geo: String,
    pub property: Property,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            timeframe: "today 12-m".to_string(),
            geo: "US".to_string(),
            property: Property::YouTube,
        }
    }
}

impl QuerySettings {
    /// Build the query for one keyword.
    pub fn query_for(&self, keyword: &str) -> TrendQuery {
        TrendQuery {
            keyword: keyword.to_string(),
            timeframe: self.timeframe.clone(),
            geo: self.geo.clone(),
            property: self.property,
        }
    }
}

/// One interest-over-time request.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendQuery {
    pub keyword: String,
    pub timeframe: String,
    pub geo: String,
    pub property: Property,
}

/// A single point on an interest-over-time series.
#[derive(Debug, Clone, PartialEq)]
pub struct InterestPoint {
    /// Start of the bucket, when the source reports one
    pub time: Option<DateTime<Utc>>,
    /// Relative interest, 0 to 100
    pub value: f64,
    pub has_data: bool,
    /// The bucket is still filling (usually the most recent one)
    pub is_partial: bool,
}

/// Interest over time for one keyword.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterestSeries {
    pub keyword: String,
    pub points: Vec<InterestPoint>,
}

impl InterestSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Arithmetic mean of all point values, `None` for an empty series.
    pub fn mean(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        let sum: f64 = self.points.iter().map(|p| p.value).sum();
        Some(sum / self.points.len() as f64)
    }
}

/// A keyword paired with its average interest over the query window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRecord {
    pub keyword: String,
    pub average_interest: f64,
}
