//! # hjmatch Loader
//!
//! File-facing side of hjmatch: JSON configuration, line-oriented reference
//! files, and a [`MatcherBuilder`] that merges them into a
//! [`hjmatch_core::PhraseMatcher`].

pub mod builder;
pub mod config;
pub mod error;
pub mod reference;

pub use builder::MatcherBuilder;
pub use config::{MatcherSettings, DEFAULT_SECTION};
pub use error::{Error, Result};
pub use reference::{load_reference_file, read_reference_lines};
