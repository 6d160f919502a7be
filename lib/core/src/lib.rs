//! # hjmatch Core
//!
//! Core library for the hjmatch phrase normalizer.
//!
//! This crate provides the matching engine:
//!
//! - [`ReferenceCatalog`] - Ordered reference phrases and their canonical labels
//! - [`PhraseMatcher`] - Hybrid Jaccard scoring and best-label lookup with a result cache
//! - [`SharedMatcher`] - Thread-safe matcher with a parallel catalog scan
//! - [`MatchExplanation`] - Word alignment behind a match
//!
//! ## Example
//!
//! ```rust
//! use hjmatch_core::{MatcherConfig, PhraseMatcher, ReferenceCatalog};
//!
//! let catalog = ReferenceCatalog::from_lines([
//!     "blond : platinum, golden",
//!     "brown : brunette, chestnut",
//! ]).unwrap();
//!
//! let mut matcher = PhraseMatcher::new(catalog, MatcherConfig::default()).unwrap();
//! assert_eq!(matcher.find_best_match("platinum hair"), Some("blond"));
//! assert_eq!(matcher.find_best_match_cached("purple"), None);
//! ```

pub mod catalog;
pub mod cache;
pub mod error;
pub mod explain;
pub mod matcher;

/// Thread-safe matcher
///
/// Scores catalog entries in parallel with rayon and guards the cache with
/// a `parking_lot` lock.
pub mod shared;

pub use catalog::{ReferenceCatalog, ReferenceEntry, ReferenceLine};
pub use cache::{CacheLookup, CacheStats, MatchCache, MatchOutcome};
pub use error::{Error, Result};
pub use explain::{MatchExplanation, WordAlignment};
pub use matcher::{
    align, best_entry, sim_measure, Alignment, MatcherConfig, PhraseMatcher,
    DEFAULT_THRESHOLD, MIN_ACCEPT_SCORE,
};
pub use shared::SharedMatcher;

pub use hjmatch_similarity::{WordMetric, AssignmentError};
