//! Assembles a matcher from reference files, a configuration file and
//! explicit overrides.

use crate::config::{MatcherSettings, DEFAULT_SECTION};
use crate::reference::load_reference_file;
use crate::Result;
use hjmatch_core::{MatcherConfig, PhraseMatcher, ReferenceCatalog, SharedMatcher, WordMetric};
use std::path::PathBuf;

/// Builder for [`PhraseMatcher`]
///
/// Catalog entries are added in this order: reference files, inline
/// reference lines, then the configuration's `references` and
/// `references_files`. Explicit threshold and metric overrides win over the
/// configuration file.
#[derive(Debug, Clone)]
pub struct MatcherBuilder {
    reference_files: Vec<PathBuf>,
    reference_lines: Vec<String>,
    config_file: Option<PathBuf>,
    section: String,
    threshold: Option<f64>,
    metric: Option<WordMetric>,
}

impl Default for MatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MatcherBuilder {
    pub fn new() -> Self {
        Self {
            reference_files: Vec::new(),
            reference_lines: Vec::new(),
            config_file: None,
            section: DEFAULT_SECTION.to_string(),
            threshold: None,
            metric: None,
        }
    }

    pub fn reference_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_files.push(path.into());
        self
    }

    pub fn reference_line(mut self, line: impl Into<String>) -> Self {
        self.reference_lines.push(line.into());
        self
    }

    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Configuration section to read (default `method_type`)
    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn metric(mut self, metric: WordMetric) -> Self {
        self.metric = Some(metric);
        self
    }

    pub fn build(self) -> Result<PhraseMatcher> {
        let mut catalog = ReferenceCatalog::new();
        for path in &self.reference_files {
            load_reference_file(&mut catalog, path)?;
        }
        catalog.extend_lines(&self.reference_lines)?;

        let mut config = MatcherConfig::default();
        if let Some(path) = &self.config_file {
            let settings = MatcherSettings::from_file(path, &self.section)?;
            config = settings.apply(config);
            catalog.extend_lines(&settings.references)?;
            for path in &settings.references_files {
                load_reference_file(&mut catalog, path)?;
            }
        }

        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(metric) = self.metric {
            config.metric = metric;
        }

        tracing::info!(
            entries = catalog.len(),
            labels = catalog.labels().len(),
            threshold = config.threshold,
            metric = %config.metric,
            "matcher built"
        );
        Ok(PhraseMatcher::new(catalog, config)?)
    }

    pub fn build_shared(self) -> Result<SharedMatcher> {
        self.build().map(SharedMatcher::from)
    }
}
