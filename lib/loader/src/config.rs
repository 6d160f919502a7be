//! JSON matcher configuration
//!
//! The configuration file holds one section per method type:
//!
//! ```json
//! {
//!   "method_type": {
//!     "parameters": { "threshold": "0.8" },
//!     "partial_method": "jaro",
//!     "references": ["blond: platinum, golden"],
//!     "references_files": ["hair_reference.txt"]
//!   }
//! }
//! ```
//!
//! Every field inside the section is optional.

use crate::{Error, Result};
use hjmatch_core::{MatcherConfig, WordMetric};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Section read when none is named
pub const DEFAULT_SECTION: &str = "method_type";

#[derive(Debug, Deserialize)]
struct RawSection {
    #[serde(default)]
    parameters: Option<RawParameters>,
    #[serde(default)]
    partial_method: Option<String>,
    #[serde(default)]
    references: Option<Vec<String>>,
    #[serde(default)]
    references_files: Option<Vec<PathBuf>>,
}

#[derive(Debug, Deserialize)]
struct RawParameters {
    #[serde(default)]
    threshold: Option<ThresholdValue>,
}

/// Thresholds have been written both as numbers and as numeric strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ThresholdValue {
    Number(f64),
    Text(String),
}

impl ThresholdValue {
    fn parse(&self) -> Result<Option<f64>> {
        match self {
            ThresholdValue::Number(value) => Ok(Some(*value)),
            ThresholdValue::Text(text) if text.trim().is_empty() => Ok(None),
            ThresholdValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| Error::InvalidConfig(format!("threshold {text:?} is not a number"))),
        }
    }
}

/// Settings read from one configuration section
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatcherSettings {
    pub threshold: Option<f64>,
    pub metric: Option<WordMetric>,
    /// Inline reference lines
    pub references: Vec<String>,
    /// Additional reference files, already resolved against the config's directory
    pub references_files: Vec<PathBuf>,
}

impl MatcherSettings {
    /// Parse the `section` of a JSON configuration document.
    ///
    /// Relative `references_files` entries are joined onto `base_dir` when
    /// one is given.
    pub fn from_json_str(json: &str, section: &str, base_dir: Option<&Path>) -> Result<Self> {
        let mut document: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let raw = document
            .remove(section)
            .ok_or_else(|| Error::InvalidConfig(format!("missing section {section:?}")))?;
        let raw: RawSection = serde_json::from_value(raw)?;

        let threshold = match raw.parameters.and_then(|p| p.threshold) {
            Some(value) => value.parse()?,
            None => None,
        };
        let metric = raw.partial_method.as_deref().map(WordMetric::from_name);
        let references_files = raw
            .references_files
            .unwrap_or_default()
            .into_iter()
            .map(|path| match base_dir {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path,
            })
            .collect();

        Ok(Self {
            threshold,
            metric,
            references: raw.references.unwrap_or_default(),
            references_files,
        })
    }

    /// Read and parse a configuration file
    pub fn from_file(path: &Path, section: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let base_dir = path.parent().filter(|dir| !dir.as_os_str().is_empty());
        let settings = Self::from_json_str(&content, section, base_dir)?;
        tracing::debug!(
            path = %path.display(),
            section,
            threshold = ?settings.threshold,
            metric = ?settings.metric,
            references = settings.references.len(),
            references_files = settings.references_files.len(),
            "configuration loaded"
        );
        Ok(settings)
    }

    /// Overlay these settings onto `config`
    pub fn apply(&self, config: MatcherConfig) -> MatcherConfig {
        MatcherConfig {
            threshold: self.threshold.unwrap_or(config.threshold),
            metric: self.metric.unwrap_or(config.metric),
        }
    }
}
