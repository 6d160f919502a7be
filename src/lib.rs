//! # hjmatch
//!
//! Fuzzy phrase normalizer: maps noisy attribute descriptions ("platinum
//! hair", "eyes of green") onto the labels of a small controlled vocabulary.
//!
//! Each input phrase is compared with every reference phrase by aligning
//! their words with the Hungarian algorithm and folding the aligned word
//! similarities into a hybrid Jaccard coefficient. The best-scoring
//! reference phrase gives the label.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! hjmatch --reference-file hair_reference.txt --config-file hair_config.json --input phrases.txt
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use hjmatch::prelude::*;
//!
//! let catalog = ReferenceCatalog::from_lines([
//!     "blond : platinum, golden",
//!     "red : ginger, auburn",
//! ]).unwrap();
//! let config = MatcherConfig::new(0.8, WordMetric::JaroWinkler);
//! let mut matcher = PhraseMatcher::new(catalog, config).unwrap();
//!
//! assert_eq!(matcher.find_best_match_cached("platinum hair"), Some("blond"));
//! assert_eq!(matcher.find_best_match_cached("purple"), None);
//! ```
//!
//! ## Crate Structure
//!
//! - `hjmatch-similarity` - Word metrics and the assignment solver
//! - `hjmatch-core` - Reference catalog, phrase matcher, match cache
//! - `hjmatch-loader` - JSON configuration and reference files

pub mod harness;

// Re-export core types
pub use hjmatch_core::{
    MatcherConfig, PhraseMatcher, SharedMatcher,
    ReferenceCatalog, ReferenceEntry,
    MatchCache, MatchOutcome, CacheLookup, CacheStats,
    MatchExplanation, WordAlignment,
    Error, Result,
    DEFAULT_THRESHOLD, MIN_ACCEPT_SCORE,
};

// Re-export similarity building blocks
pub use hjmatch_similarity::{WordMetric, CostMatrix, Assignment};

// Re-export loading
pub use hjmatch_loader::{MatcherBuilder, MatcherSettings};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        MatcherConfig, PhraseMatcher, SharedMatcher,
        ReferenceCatalog, ReferenceEntry,
        MatchOutcome, MatchExplanation,
        WordMetric,
        MatcherBuilder,
        Error, Result,
    };
}

/// Hungarian assignment over rectangular cost matrices
pub mod assignment {
    pub use hjmatch_similarity::assignment::{solve, Assignment, AssignmentError, CostMatrix};
}
