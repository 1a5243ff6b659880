// Keyword candidate loading.
//
// Two input shapes feed the pipeline: the JSON document produced by tag
// analysis ({"common": [[tag, count], ...], "unique": [...]}) and the labelled
// text export ("Common Tags: ...\n\nUnique Tags: ...").

use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex_lite::Regex;
use serde::de::IgnoredAny;
use serde::Deserialize;
use tracing::{info, warn};

use super::dedupe;
use super::filter::filter_keywords;

static COMMON_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Common Tags:\s*(.*?)\s*Unique Tags:").expect("valid regex")
});
static UNIQUE_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Unique Tags:\s*(.*?)\s*(?:Analyzed Videos \(|\z)").expect("valid regex")
});

/// A `[tag, count]` pair. The count is accepted in any JSON form and ignored.
#[derive(Debug, Deserialize)]
pub struct TaggedTerm(pub String, pub IgnoredAny);

/// The JSON document accepted on stdin in `--json` mode.
#[derive(Debug, Default, Deserialize)]
pub struct TagDocument {
    #[serde(default)]
    pub common: Option<Vec<TaggedTerm>>,
    #[serde(default)]
    pub unique: Option<Vec<TaggedTerm>>,
}

impl TagDocument {
    /// All tag strings, common first, without repeats.
    pub fn candidates(&self) -> Vec<String> {
        let common = self.common.iter().flatten();
        let unique = self.unique.iter().flatten();
        dedupe(common.chain(unique).map(|term| term.0.clone()))
    }
}

/// Parse the JSON document and return its raw (unfiltered) tag candidates.
pub fn candidates_from_json(input: &str) -> Result<Vec<String>> {
    let doc: TagDocument =
        serde_json::from_str(input).context("Failed to parse tag document JSON")?;
    Ok(doc.candidates())
}

/// Pull the raw candidates out of a labelled text export.
///
/// The common block runs from "Common Tags:" to the first "Unique Tags:";
/// the unique block runs from "Unique Tags:" to the end of the text, or to
/// the "Analyzed Videos (...)" listing when one follows. Either may be
/// missing.
pub fn candidates_from_text(content: &str) -> Vec<String> {
    let mut sections = Vec::with_capacity(2);
    if let Some(caps) = COMMON_SECTION_RE.captures(content) {
        sections.push(caps.get(1).map_or("", |m| m.as_str()));
    }
    if let Some(caps) = UNIQUE_SECTION_RE.captures(content) {
        sections.push(caps.get(1).map_or("", |m| m.as_str()));
    }

    dedupe(
        sections
            .into_iter()
            .flat_map(|section| section.split(','))
            .map(str::trim),
    )
}

/// Load and filter keywords from a labelled text file.
///
/// A missing file is not an error: it is reported and yields no keywords so
/// the caller can decide what to do. Other read failures propagate.
pub fn load_keywords(path: &Path) -> Result<Vec<String>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "Keyword file not found");
            eprintln!("File not found. Please check the path and try again.");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let candidates = candidates_from_text(&content);
    let keywords = filter_keywords(&candidates);
    info!(
        candidates = candidates.len(),
        keywords = keywords.len(),
        path = %path.display(),
        "Loaded keywords"
    );
    Ok(keywords)
}
