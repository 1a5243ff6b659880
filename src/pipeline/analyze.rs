// Sequential trend analysis: query every keyword, average its interest, rank.
//
// One keyword at a time, with the throttle before each request. A failing
// keyword is logged and skipped; the rest of the batch still runs.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::trends::models::{QuerySettings, TrendRecord};
use crate::trends::throttle::Throttle;
use crate::trends::traits::TrendSource;

/// Query each keyword and return records ranked by average interest.
///
/// Records are sorted descending by score; equal scores keep the order in
/// which their keywords were given.
pub async fn analyze_keywords(
    source: &dyn TrendSource,
    keywords: &[String],
    settings: &QuerySettings,
    throttle: &Throttle,
) -> Vec<TrendRecord> {
    let mut records = Vec::with_capacity(keywords.len());
    let mut failed: Vec<&str> = Vec::new();

    let pb = ProgressBar::new(keywords.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("  Trends [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for keyword in keywords {
        pb.set_message(keyword.clone());
        info!(keyword = %keyword, "Processing keyword");
        throttle.pause().await;

        let query = settings.query_for(keyword);
        match source.interest_over_time(&query).await {
            Ok(series) if source.is_usable(&series) => {
                if let Some(average_interest) = series.mean() {
                    debug!(
                        keyword = %keyword,
                        points = series.len(),
                        average_interest,
                        "Averaged interest"
                    );
                    records.push(TrendRecord {
                        keyword: keyword.clone(),
                        average_interest,
                    });
                }
            }
            Ok(_) => {
                debug!(keyword = %keyword, "No usable interest data, skipping");
            }
            Err(e) => {
                warn!(keyword = %keyword, error = %e, "Failed to fetch interest, skipping");
                failed.push(keyword);
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if !failed.is_empty() {
        warn!(
            count = failed.len(),
            keywords = %failed.join(", "),
            "Keywords that failed during trend lookup"
        );
    }

    rank_records(&mut records);
    info!(
        ranked = records.len(),
        failed = failed.len(),
        total = keywords.len(),
        "Trend analysis finished"
    );
    records
}

/// Sort descending by score. `sort_by` is stable, so ties keep their order.
pub fn rank_records(records: &mut [TrendRecord]) {
    records.sort_by(|a, b| b.average_interest.total_cmp(&a.average_interest));
}
