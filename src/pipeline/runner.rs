// End-to-end runs: JSON document in, JSON response out; or keyword file in,
// tags file out.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::keywords::filter::filter_keywords;
use crate::keywords::loader::{candidates_from_json, load_keywords};
use crate::output::{format_trends, save_tags};
use crate::trends::models::{QuerySettings, TrendRecord};
use crate::trends::throttle::Throttle;
use crate::trends::traits::TrendSource;

use super::analyze::analyze_keywords;

/// The JSON document written to stdout in `--json` mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendsResponse {
    pub trends: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TrendsResponse {
    pub fn success(trends: String) -> Self {
        Self {
            trends,
            status: "success",
            error: None,
        }
    }

    pub fn failure(error: &anyhow::Error) -> Self {
        Self {
            trends: String::new(),
            status: "error",
            error: Some(format!("{error:#}")),
        }
    }
}

/// Result of a keyword-file run.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRun {
    /// Ranked records, best first
    pub records: Vec<TrendRecord>,
    /// The scored summary ("kw (12.34), ...")
    pub summary: String,
    /// The plain keyword list written to the tags file
    pub tags: String,
}

/// The four pipeline stages wired to one trend source.
pub struct TrendPipeline<'a> {
    pub source: &'a dyn TrendSource,
    pub settings: &'a QuerySettings,
    pub throttle: Throttle,
    pub char_limit: usize,
}

impl<'a> TrendPipeline<'a> {
    /// Rank already-filtered keywords and format the scored summary.
    pub async fn rank(&self, keywords: &[String]) -> (Vec<TrendRecord>, String) {
        let records = analyze_keywords(self.source, keywords, self.settings, &self.throttle).await;
        let summary = format_trends(&records, self.char_limit);
        (records, summary)
    }

    /// Run the pipeline over a `{"common": ..., "unique": ...}` document.
    pub async fn analyze_json(&self, input: &str) -> Result<TrendsResponse> {
        let candidates = candidates_from_json(input)?;
        let keywords = filter_keywords(&candidates);
        info!(
            candidates = candidates.len(),
            keywords = keywords.len(),
            "Parsed tag document"
        );

        let (_, summary) = self.rank(&keywords).await;
        Ok(TrendsResponse::success(summary))
    }

    /// Run the pipeline over a labelled keyword file and write the tags file.
    ///
    /// Returns `None` when no keywords could be loaded (including a missing
    /// file); nothing is written in that case.
    pub async fn analyze_file(&self, path: &Path, output: &Path) -> Result<Option<FileRun>> {
        let keywords = load_keywords(path)?;
        if keywords.is_empty() {
            return Ok(None);
        }

        let (records, summary) = self.rank(&keywords).await;
        let tags = save_tags(&summary, output, self.char_limit)?;

        Ok(Some(FileRun {
            records,
            summary,
            tags,
        }))
    }
}

/// Answer one `--json` request, setup included.
///
/// `setup` loads the configuration and builds the trend source. Its failures
/// come back as errors like any other, so the caller can always print an
/// error document.
pub async fn answer_json<F>(input: &str, setup: F) -> Result<TrendsResponse>
where
    F: FnOnce() -> Result<(Config, Box<dyn TrendSource>)>,
{
    let (config, source) = setup()?;
    let pipeline = TrendPipeline {
        source: source.as_ref(),
        settings: &config.query,
        throttle: Throttle::new(config.delay),
        char_limit: config.char_limit,
    };
    pipeline.analyze_json(input).await
}
