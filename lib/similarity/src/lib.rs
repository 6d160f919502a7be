//! # hjmatch Similarity
//!
//! Word-level building blocks for the hybrid Jaccard phrase matcher.
//!
//! This crate provides:
//!
//! - [`WordMetric`] - Pluggable word similarity (Jaro-Winkler, normalized edit distance)
//! - [`CostMatrix`] / [`solve`] - Hungarian minimum-cost assignment over rectangular matrices
//!
//! ## Example
//!
//! ```rust
//! use hjmatch_similarity::{solve, CostMatrix, WordMetric};
//!
//! let input = ["platinum", "hair"];
//! let reference = ["hair"];
//!
//! let metric = WordMetric::JaroWinkler;
//! let costs = CostMatrix::from_fn(input.len(), reference.len(), |i, j| {
//!     1.0 - metric.similarity(input[i], reference[j])
//! });
//!
//! let assignment = solve(&costs).unwrap();
//! assert_eq!(assignment.pairs, vec![(1, 0)]);
//! ```

pub mod distance;
pub mod assignment;

pub use distance::{WordMetric, jaro_winkler_similarity, levenshtein_similarity};
pub use assignment::{solve, Assignment, AssignmentError, CostMatrix};
