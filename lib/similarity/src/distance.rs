//! Word-level similarity metrics
//!
//! Provides the per-word scores used to fill the phrase cost matrix.
//! All metrics return a similarity score in range [0.0, 1.0] where 1.0 means identical.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Word similarity metric selected at matcher construction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WordMetric {
    /// Jaro similarity with the Winkler common-prefix bonus
    #[default]
    #[serde(alias = "jaro")]
    JaroWinkler,
    /// Edit distance normalized by the shorter word's length
    #[serde(alias = "edit_distance")]
    Levenshtein,
}

impl WordMetric {
    /// Resolve a metric from its configuration name.
    ///
    /// Unknown names fall back to [`WordMetric::Levenshtein`], the way the
    /// `partial_method` setting has always behaved.
    pub fn from_name(name: &str) -> Self {
        match Self::parse(name) {
            Some(metric) => metric,
            None => {
                tracing::warn!(method = name, "unknown word metric, falling back to levenshtein");
                WordMetric::Levenshtein
            }
        }
    }

    /// Strict variant of [`WordMetric::from_name`]: `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "jaro" | "jaro_winkler" | "jaro-winkler" => Some(WordMetric::JaroWinkler),
            "levenshtein" | "edit_distance" | "edit-distance" => Some(WordMetric::Levenshtein),
            _ => None,
        }
    }

    /// Configuration name of the metric
    pub fn name(&self) -> &'static str {
        match self {
            WordMetric::JaroWinkler => "jaro",
            WordMetric::Levenshtein => "levenshtein",
        }
    }

    /// Score two words with this metric
    #[inline]
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        match self {
            WordMetric::JaroWinkler => jaro_winkler_similarity(a, b),
            WordMetric::Levenshtein => levenshtein_similarity(a, b),
        }
    }
}

impl fmt::Display for WordMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Jaro-Winkler similarity between two words
///
/// The greedy Jaro match search depends on argument order for a handful of
/// inputs, so the pair is scored in lexicographic order to stay symmetric.
pub fn jaro_winkler_similarity(a: &str, b: &str) -> f64 {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    strsim::jaro_winkler(first, second).clamp(0.0, 1.0)
}

/// Normalized edit-distance similarity between two words
///
/// Computes `(max(|a|, |b|) - d) / min(|a|, |b|)` over Unicode scalar values,
/// where `d` is the unit-cost Levenshtein distance. Since
/// `max - min <= d <= max`, the ratio always lands in [0.0, 1.0]; note that a
/// word scores 1.0 against any word it is a prefix or infix of.
///
/// # Returns
/// 1.0 when both words are empty, 0.0 when exactly one is empty
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();

    if len_a == 0 && len_b == 0 {
        return 1.0;
    }
    let min_len = len_a.min(len_b);
    if min_len == 0 {
        return 0.0;
    }
    let max_len = len_a.max(len_b);

    let distance = strsim::levenshtein(a, b);
    let sim = (max_len as f64 - distance as f64) / min_len as f64;
    sim.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORDS: &[&str] = &[
        "blond", "blonde", "platinum", "golden", "hair", "green", "blue", "hazel",
        "grey", "gray", "auburn", "a", "ab", "abcdefghij", "dixon", "dicksonx",
    ];

    #[test]
    fn test_identity_is_exactly_one() {
        for metric in [WordMetric::JaroWinkler, WordMetric::Levenshtein] {
            for w in WORDS {
                assert_eq!(metric.similarity(w, w), 1.0, "{metric} on {w}");
            }
        }
    }

    #[test]
    fn test_symmetry() {
        for metric in [WordMetric::JaroWinkler, WordMetric::Levenshtein] {
            for a in WORDS {
                for b in WORDS {
                    assert_eq!(metric.similarity(a, b), metric.similarity(b, a), "{metric} {a}/{b}");
                }
            }
        }
    }

    #[test]
    fn test_range() {
        for metric in [WordMetric::JaroWinkler, WordMetric::Levenshtein] {
            for a in WORDS {
                for b in WORDS {
                    let sim = metric.similarity(a, b);
                    assert!((0.0..=1.0).contains(&sim), "{metric} {a}/{b} = {sim}");
                }
            }
        }
    }

    #[test]
    fn test_jaro_winkler_prefix_bonus() {
        let jaro = strsim::jaro("blond", "blonde");
        let jw = jaro_winkler_similarity("blond", "blonde");
        assert!(jw >= jaro);
        assert!(jw > 0.9);
    }

    #[test]
    fn test_jaro_winkler_dissimilar() {
        assert!(jaro_winkler_similarity("green", "blue") < 0.8);
        assert!(jaro_winkler_similarity("platinum", "blond") < 0.8);
    }

    #[test]
    fn test_levenshtein_normalization() {
        // one substitution over four characters
        assert!((levenshtein_similarity("grey", "gray") - 0.75).abs() < 1e-12);
        // "blond" is a prefix of "blonde": d = 1, (6 - 1) / 5
        assert_eq!(levenshtein_similarity("blond", "blonde"), 1.0);
        // nothing in common
        assert_eq!(levenshtein_similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_levenshtein_length_mismatch_stays_in_range() {
        assert_eq!(levenshtein_similarity("a", "abcdefghij"), 1.0);
        assert_eq!(levenshtein_similarity("x", "abcdefghij"), 0.0);
    }

    #[test]
    fn test_empty_words() {
        assert_eq!(levenshtein_similarity("", ""), 1.0);
        assert_eq!(levenshtein_similarity("", "abc"), 0.0);
        assert_eq!(jaro_winkler_similarity("", "abc"), 0.0);
    }

    #[test]
    fn test_metric_names() {
        assert_eq!(WordMetric::from_name("jaro"), WordMetric::JaroWinkler);
        assert_eq!(WordMetric::from_name("Jaro_Winkler"), WordMetric::JaroWinkler);
        assert_eq!(WordMetric::from_name("levenshtein"), WordMetric::Levenshtein);
        assert_eq!(WordMetric::from_name("something_else"), WordMetric::Levenshtein);
        assert_eq!(WordMetric::parse("something_else"), None);
        assert_eq!(WordMetric::default(), WordMetric::JaroWinkler);
    }
}
