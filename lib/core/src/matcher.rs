//! Hybrid Jaccard phrase matcher
//!
//! Scores an input phrase against every catalog entry. Words are aligned
//! one-to-one by a minimum-cost assignment over `1 - similarity`, and the
//! aligned similarities are folded into a Jaccard-style coefficient:
//!
//! ```text
//! score = sum(similarities) / (n + m - k + z)
//! ```
//!
//! where `n`, `m` are the phrase lengths, `k = min(n, m)` is the number of
//! aligned pairs and `z` the number of those pairs whose similarity fell
//! below the threshold.

use crate::cache::{CacheLookup, CacheStats, MatchCache, MatchOutcome};
use crate::catalog::ReferenceCatalog;
use crate::explain::{MatchExplanation, WordAlignment};
use crate::{Error, Result};
use hjmatch_similarity::{solve, CostMatrix, WordMetric};
use serde::{Deserialize, Serialize};

/// Default word similarity threshold
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Best scores below this are reported as no match
pub const MIN_ACCEPT_SCORE: f64 = 1e-20;

/// Matcher configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Word similarities strictly below this count as no similarity at all
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub metric: WordMetric,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            metric: WordMetric::default(),
        }
    }
}

impl MatcherConfig {
    pub fn new(threshold: f64, metric: WordMetric) -> Self {
        Self { threshold, metric }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidThreshold(self.threshold));
        }
        Ok(())
    }

    /// Word similarity after thresholding
    #[inline]
    pub fn word_similarity(&self, a: &str, b: &str) -> f64 {
        let sim = self.metric.similarity(a, b);
        if sim < self.threshold {
            0.0
        } else {
            sim
        }
    }
}

/// Optimal word alignment between two phrases
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// (input word index, reference word index, thresholded similarity)
    pub pairs: Vec<(usize, usize, f64)>,
    /// Hybrid Jaccard score of the alignment
    pub score: f64,
}

/// Align two word sequences and score them.
///
/// Returns `None` when either side is empty.
pub fn align<A, B>(config: &MatcherConfig, words_a: &[A], words_b: &[B]) -> Result<Option<Alignment>>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let n = words_a.len();
    let m = words_b.len();
    if n == 0 || m == 0 {
        return Ok(None);
    }

    let costs = CostMatrix::from_fn(n, m, |i, j| {
        1.0 - config.word_similarity(words_a[i].as_ref(), words_b[j].as_ref())
    });
    let assignment = solve(&costs)?;

    let pairs: Vec<(usize, usize, f64)> = assignment
        .iter()
        .map(|&(i, j)| (i, j, 1.0 - costs.get(i, j)))
        .collect();

    let k = pairs.len();
    let zeros = pairs.iter().filter(|&&(_, _, sim)| sim == 0.0).count();
    let total: f64 = pairs.iter().map(|&(_, _, sim)| sim).sum();
    let score = total / (n + m - k + zeros) as f64;

    Ok(Some(Alignment { pairs, score }))
}

/// Hybrid Jaccard similarity between two word sequences
pub fn sim_measure<A, B>(config: &MatcherConfig, words_a: &[A], words_b: &[B]) -> f64
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    // Costs come from similarities clamped to [0, 1], so solving cannot fail
    let alignment = align(config, words_a, words_b);
    debug_assert!(alignment.is_ok(), "word alignment failed: {alignment:?}");
    alignment.ok().flatten().map_or(0.0, |alignment| alignment.score)
}

/// Scan the catalog for the best-scoring entry.
///
/// The first entry reaching the maximum wins; a maximum below
/// [`MIN_ACCEPT_SCORE`] (including an empty catalog) yields `None`.
pub fn best_entry<S: AsRef<str>>(
    config: &MatcherConfig,
    catalog: &ReferenceCatalog,
    words: &[S],
) -> Option<(usize, f64)> {
    if words.is_empty() {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    let mut max_sim = 0.0f64;
    for (idx, entry) in catalog.iter().enumerate() {
        let sim = sim_measure(config, words, entry.words());
        if sim > max_sim {
            max_sim = sim;
            best = Some((idx, sim));
        }
    }

    best.filter(|&(_, score)| score >= MIN_ACCEPT_SCORE)
}

fn retokenize<S: AsRef<str>>(words: &[S]) -> Vec<&str> {
    words.iter().flat_map(|w| w.as_ref().split_whitespace()).collect()
}

/// Phrase matcher owning its catalog, configuration and cache
#[derive(Debug)]
pub struct PhraseMatcher {
    config: MatcherConfig,
    catalog: ReferenceCatalog,
    cache: MatchCache,
}

impl PhraseMatcher {
    pub fn new(catalog: ReferenceCatalog, config: MatcherConfig) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            entries = catalog.len(),
            threshold = config.threshold,
            metric = %config.metric,
            "phrase matcher created"
        );
        Ok(Self {
            config,
            catalog,
            cache: MatchCache::new(),
        })
    }

    /// Matcher with the default configuration
    pub fn with_catalog(catalog: ReferenceCatalog) -> Self {
        Self {
            config: MatcherConfig::default(),
            catalog,
            cache: MatchCache::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    #[inline]
    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Hybrid Jaccard similarity between two word sequences
    pub fn sim_measure<A, B>(&self, words_a: &[A], words_b: &[B]) -> f64
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        sim_measure(&self.config, words_a, words_b)
    }

    /// Best label for a phrase, split on whitespace
    pub fn find_best_match(&self, phrase: &str) -> Option<&str> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        self.find_best_match_words(&words)
    }

    /// Best label for an already tokenized phrase
    ///
    /// Words containing whitespace are split further, so `["golden hair"]`
    /// and `["golden", "hair"]` are the same phrase.
    pub fn find_best_match_words<S: AsRef<str>>(&self, words: &[S]) -> Option<&str> {
        let words = retokenize(words);
        let best = best_entry(&self.config, &self.catalog, &words);
        if let Some((idx, score)) = best {
            tracing::trace!(entry = idx, score, "best entry");
        }
        best.and_then(|(idx, _)| self.catalog.get(idx)).map(|entry| entry.label())
    }

    /// [`PhraseMatcher::find_best_match`] memoized by the literal input string
    pub fn find_best_match_cached(&mut self, phrase: &str) -> Option<&str> {
        if matches!(self.cache.lookup(phrase), CacheLookup::NotComputed) {
            let outcome = MatchOutcome::from(self.find_best_match(phrase));
            self.cache.insert(phrase.to_string(), outcome);
        }
        self.cache.peek(phrase).and_then(MatchOutcome::label)
    }

    /// [`PhraseMatcher::find_best_match_words`] memoized by the words joined
    /// with single spaces
    pub fn find_best_match_words_cached<S: AsRef<str>>(&mut self, words: &[S]) -> Option<&str> {
        let key = retokenize(words).join(" ");
        if matches!(self.cache.lookup(&key), CacheLookup::NotComputed) {
            let outcome = MatchOutcome::from(self.find_best_match_words(words));
            self.cache.insert(key.clone(), outcome);
        }
        self.cache.peek(&key).and_then(MatchOutcome::label)
    }

    /// Describe how the best match for `phrase` was reached
    pub fn explain(&self, phrase: &str) -> Option<MatchExplanation> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let (idx, _) = best_entry(&self.config, &self.catalog, &words)?;
        let entry = self.catalog.get(idx)?;
        let alignment = align(&self.config, &words, entry.words()).ok()??;

        Some(MatchExplanation {
            input: phrase.to_string(),
            label: entry.label().to_string(),
            reference: entry.phrase(),
            entry_index: idx,
            score: alignment.score,
            alignment: alignment
                .pairs
                .iter()
                .map(|&(i, j, similarity)| WordAlignment {
                    input_word: words[i].to_string(),
                    reference_word: entry.words()[j].clone(),
                    similarity,
                })
                .collect(),
        })
    }

    pub(crate) fn into_parts(self) -> (MatcherConfig, ReferenceCatalog, MatchCache) {
        (self.config, self.catalog, self.cache)
    }
}
