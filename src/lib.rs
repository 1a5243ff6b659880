// tagtrends: rank video tags by Google Trends interest
//
// This is the library root. Each module corresponds to a stage of the
// keyword-to-trends pipeline.

pub mod config;
pub mod keywords;
pub mod output;
pub mod pipeline;
pub mod tags;
pub mod trends;
pub mod youtube;
