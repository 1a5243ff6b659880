// Keyword intake: loading candidates from JSON or labelled text, then cleaning
// them into the tokens we query trends for.

pub mod filter;
pub mod loader;

use std::collections::HashSet;

/// Drop repeated entries while keeping the first-seen order.
pub fn dedupe<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let item = item.into();
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    out
}
