// YouTube tag collection.
//
// The Data API v3 supplies the raw tags that tag frequency analysis counts:
// search by title, keep the most viewed medium-length videos of the last
// year, and gather their `snippet.tags`.

pub mod client;
pub mod models;
