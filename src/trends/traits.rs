// Trend source trait: the seam between the sequential analyzer and the
// network.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{InterestSeries, TrendQuery};

/// Anything that can report interest over time for a keyword.
///
/// Implementations must be async because the real provider is an HTTP API.
#[async_trait]
pub trait TrendSource: Send + Sync {
    /// Fetch the interest series for a single query.
    async fn interest_over_time(&self, query: &TrendQuery) -> Result<InterestSeries>;

    /// Whether a fetched series carries enough data to be averaged.
    ///
    /// Unusable series are skipped without counting as failures.
    fn is_usable(&self, series: &InterestSeries) -> bool {
        !series.is_empty()
    }
}
