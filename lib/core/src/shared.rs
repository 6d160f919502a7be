//! Thread-safe matcher
//!
//! The catalog is read-only once built, so entries are scored in parallel.
//! The cache sits behind a lock; when two threads compute the same input
//! concurrently, the first insert wins and both return the stored value.

use crate::cache::{CacheLookup, CacheStats, MatchCache, MatchOutcome};
use crate::catalog::ReferenceCatalog;
use crate::matcher::{sim_measure, MatcherConfig, PhraseMatcher, MIN_ACCEPT_SCORE};
use crate::Result;
use parking_lot::RwLock;
use rayon::prelude::*;

/// Parallel counterpart of [`crate::matcher::best_entry`], with the same
/// first-entry tie-break.
pub fn par_best_entry<S>(
    config: &MatcherConfig,
    catalog: &ReferenceCatalog,
    words: &[S],
) -> Option<(usize, f64)>
where
    S: AsRef<str> + Sync,
{
    if words.is_empty() {
        return None;
    }

    let (idx, score) = catalog
        .entries()
        .par_iter()
        .enumerate()
        .map(|(idx, entry)| (idx, sim_measure(config, words, entry.words())))
        .reduce(
            || (usize::MAX, f64::NEG_INFINITY),
            |a, b| {
                if b.1 > a.1 || (b.1 == a.1 && b.0 < a.0) {
                    b
                } else {
                    a
                }
            },
        );

    if idx == usize::MAX || score < MIN_ACCEPT_SCORE {
        None
    } else {
        Some((idx, score))
    }
}

/// Matcher that can be shared across threads
#[derive(Debug)]
pub struct SharedMatcher {
    config: MatcherConfig,
    catalog: ReferenceCatalog,
    cache: RwLock<MatchCache>,
}

impl SharedMatcher {
    pub fn new(catalog: ReferenceCatalog, config: MatcherConfig) -> Result<Self> {
        PhraseMatcher::new(catalog, config).map(Self::from)
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
        self.cache.read().stats()
    }

    pub fn find_best_match(&self, phrase: &str) -> Option<&str> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        par_best_entry(&self.config, &self.catalog, &words)
            .and_then(|(idx, _)| self.catalog.get(idx))
            .map(|entry| entry.label())
    }

    pub fn find_best_match_cached(&self, phrase: &str) -> Option<String> {
        {
            let cache = self.cache.read();
            match cache.lookup(phrase) {
                CacheLookup::Matched(label) => return Some(label.to_string()),
                CacheLookup::NoMatch => return None,
                CacheLookup::NotComputed => {}
            }
        }

        let outcome = MatchOutcome::from(self.find_best_match(phrase));
        let mut cache = self.cache.write();
        cache
            .insert(phrase.to_string(), outcome)
            .label()
            .map(str::to_string)
    }
}

impl From<PhraseMatcher> for SharedMatcher {
    fn from(matcher: PhraseMatcher) -> Self {
        let (config, catalog, cache) = matcher.into_parts();
        Self {
            config,
            catalog,
            cache: RwLock::new(cache),
        }
    }
}
