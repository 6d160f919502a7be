use hjmatch_similarity::AssignmentError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Phrase '{phrase}' already maps to '{existing}', cannot also map to '{requested}'")]
    ConflictingPhrase {
        phrase: String,
        existing: String,
        requested: String,
    },

    #[error("Reference line has synonyms but no label: {0:?}")]
    EmptyLabel(String),

    #[error("Invalid threshold: {0} (expected a finite value in [0, 1])")]
    InvalidThreshold(f64),

    #[error("Assignment error: {0}")]
    Assignment(#[from] AssignmentError),
}
