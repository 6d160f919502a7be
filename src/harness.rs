//! Line harness behind the `hjmatch` binary
//!
//! Turns one input line into the phrase to match, and renders the result as
//! `line => label`.

use hjmatch_core::{MatchExplanation, PhraseMatcher};
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;

/// Fixed line layout for `--extract`: `<id> <<tag>> <phrase>`
pub const LINE_PATTERN: &str = r"^([0-9]+) <(.*)> (.*)$";

/// Capture group holding the phrase in [`LINE_PATTERN`]
pub const PHRASE_GROUP: usize = 3;

/// Rendering of a missing match
pub const NO_MATCH_TEXT: &str = "(NONE)";

/// Per-line JSON record for `--explain`
#[derive(Debug, Clone, Serialize)]
pub struct ExplainRecord<'a> {
    pub line: &'a str,
    pub phrase: Option<&'a str>,
    #[serde(rename = "match")]
    pub matched: Option<MatchExplanation>,
}

/// Extracts phrases from input lines
#[derive(Debug, Clone)]
pub struct LineProcessor {
    pattern: Option<Regex>,
    lowercase: bool,
}

impl LineProcessor {
    pub fn new(extract: bool, lowercase: bool) -> Result<Self, regex::Error> {
        let pattern = if extract { Some(Regex::new(LINE_PATTERN)?) } else { None };
        Ok(Self { pattern, lowercase })
    }

    /// Phrase to match for `line`, or `None` when extraction is on and the
    /// line does not fit the pattern
    pub fn phrase<'a>(&self, line: &'a str) -> Option<Cow<'a, str>> {
        let line = line.trim();
        let phrase = match &self.pattern {
            Some(pattern) => pattern.captures(line)?.get(PHRASE_GROUP)?.as_str(),
            None => line,
        };
        if self.lowercase {
            Some(Cow::Owned(phrase.to_lowercase()))
        } else {
            Some(Cow::Borrowed(phrase))
        }
    }

    /// Match one line through the cache and render `line => label`
    pub fn process(&self, matcher: &mut PhraseMatcher, line: &str) -> String {
        let line = line.trim();
        let result = match self.phrase(line) {
            Some(phrase) => matcher.find_best_match_cached(&phrase),
            None => {
                tracing::debug!(line, "line does not match the extraction pattern");
                None
            }
        };
        render(line, result)
    }

    /// Match one line and render the explanation as JSON
    pub fn explain(&self, matcher: &PhraseMatcher, line: &str) -> serde_json::Result<String> {
        let line = line.trim();
        let phrase = self.phrase(line);
        let record = ExplainRecord {
            line,
            phrase: phrase.as_deref(),
            matched: phrase.as_deref().and_then(|p| matcher.explain(p)),
        };
        serde_json::to_string(&record)
    }
}

/// Render a result line
pub fn render(line: &str, result: Option<&str>) -> String {
    format!("{} => {}", line, result.unwrap_or(NO_MATCH_TEXT))
}
