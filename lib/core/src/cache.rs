//! Memoization of best-match results
//!
//! Keys are the literal input strings; callers normalize before lookup if
//! they want case or whitespace folded. Entries are never evicted.

use ahash::AHashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// A computed best-match result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "label", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Resolved to a catalog label
    Matched(String),
    /// Computed, and nothing scored above the acceptance floor
    NoMatch,
}

impl MatchOutcome {
    #[inline]
    pub fn label(&self) -> Option<&str> {
        match self {
            MatchOutcome::Matched(label) => Some(label),
            MatchOutcome::NoMatch => None,
        }
    }

    #[inline]
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }
}

impl From<Option<&str>> for MatchOutcome {
    fn from(label: Option<&str>) -> Self {
        match label {
            Some(label) => MatchOutcome::Matched(label.to_string()),
            None => MatchOutcome::NoMatch,
        }
    }
}

/// State of an input string in the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLookup<'a> {
    NotComputed,
    Matched(&'a str),
    NoMatch,
}

/// Cache occupancy and hit counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Per-matcher result cache
#[derive(Debug, Default)]
pub struct MatchCache {
    entries: AHashMap<String, MatchOutcome>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MatchCache {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `input`, counting the hit or miss
    pub fn lookup(&self, input: &str) -> CacheLookup<'_> {
        match self.entries.get(input) {
            Some(MatchOutcome::Matched(label)) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                CacheLookup::Matched(label)
            }
            Some(MatchOutcome::NoMatch) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                CacheLookup::NoMatch
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                CacheLookup::NotComputed
            }
        }
    }

    /// Read an entry without touching the counters
    #[inline]
    pub fn peek(&self, input: &str) -> Option<&MatchOutcome> {
        self.entries.get(input)
    }

    /// Store `outcome` for `input` unless a result is already present.
    ///
    /// # Returns
    /// The stored outcome, which is the earlier one if `input` was cached
    pub fn insert(&mut self, input: String, outcome: MatchOutcome) -> &MatchOutcome {
        self.entries.entry(input).or_insert(outcome)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_states() {
        let mut cache = MatchCache::new();
        assert_eq!(cache.lookup("platinum hair"), CacheLookup::NotComputed);

        cache.insert("platinum hair".to_string(), MatchOutcome::Matched("blond".to_string()));
        cache.insert("green".to_string(), MatchOutcome::NoMatch);

        assert_eq!(cache.lookup("platinum hair"), CacheLookup::Matched("blond"));
        assert_eq!(cache.lookup("green"), CacheLookup::NoMatch);
        assert_eq!(cache.lookup("Green"), CacheLookup::NotComputed);
    }

    #[test]
    fn test_first_writer_wins() {
        let mut cache = MatchCache::new();
        cache.insert("x".to_string(), MatchOutcome::NoMatch);
        let stored = cache.insert("x".to_string(), MatchOutcome::Matched("blue".to_string()));
        assert_eq!(stored, &MatchOutcome::NoMatch);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stats() {
        let mut cache = MatchCache::new();
        cache.lookup("a");
        cache.insert("a".to_string(), MatchOutcome::NoMatch);
        cache.lookup("a");
        cache.lookup("a");
        assert_eq!(cache.peek("a"), Some(&MatchOutcome::NoMatch));

        let stats = cache.stats();
        assert_eq!(stats, CacheStats { entries: 1, hits: 2, misses: 1 });
    }

    #[test]
    fn test_outcome_from_option() {
        assert_eq!(MatchOutcome::from(Some("blue")).label(), Some("blue"));
        assert!(!MatchOutcome::from(None).is_match());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&MatchOutcome::Matched("blond".to_string())).unwrap();
        assert_eq!(json, r#"{"outcome":"matched","label":"blond"}"#);
        let json = serde_json::to_string(&MatchOutcome::NoMatch).unwrap();
        assert_eq!(json, r#"{"outcome":"no_match"}"#);
    }
}
