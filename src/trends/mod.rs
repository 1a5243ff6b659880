// Trend interest lookup: trait-based abstraction over the popularity source.
//
// The TrendSource trait defines the interface. GoogleTrendsClient implements
// it against the unofficial Google Trends endpoints; tests drive the analyzer
// with in-memory fakes instead.

pub mod google;
pub mod models;
pub mod throttle;
pub mod traits;
