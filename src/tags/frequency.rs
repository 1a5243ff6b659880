// Counting tags and picking the common and unique sets.

use std::collections::HashMap;

use serde::Serialize;

/// How many of the most frequent tags count as "common" by default.
pub const DEFAULT_COMMON_LIMIT: usize = 10;

/// Tags grouped by how often they occurred.
///
/// Serializes to `{"common": [[tag, count], ...], "unique": [...]}`, the
/// document accepted by `--json` mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagAnalysis {
    /// The most frequent tags, highest count first
    pub common: Vec<(String, u32)>,
    /// Tags that occurred exactly once
    pub unique: Vec<(String, u32)>,
}

impl TagAnalysis {
    pub fn is_empty(&self) -> bool {
        self.common.is_empty() && self.unique.is_empty()
    }
}

/// Split a raw tag dump on commas and newlines, dropping blanks.
pub fn parse_raw_tags(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Count tags and select the common (top `common_limit`) and unique
/// (count of one) sets.
///
/// Ordering is by count descending; equal counts keep first-seen order.
pub fn analyze_tags(tags: &[String], common_limit: usize) -> TagAnalysis {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, u32)> = Vec::new();

    for tag in tags {
        match index.get(tag.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(tag.as_str(), counts.len());
                counts.push((tag.clone(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    TagAnalysis {
        common: counts.iter().take(common_limit).cloned().collect(),
        unique: counts.into_iter().filter(|(_, n)| *n == 1).collect(),
    }
}
