use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Core(#[from] hjmatch_core::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let error = Error::io(
            "eye_reference.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        );
        let display = error.to_string();
        assert!(display.contains("eye_reference.txt"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_core_error_is_transparent() {
        let error: Error = hjmatch_core::Error::InvalidThreshold(2.0).into();
        assert_eq!(error.to_string(), hjmatch_core::Error::InvalidThreshold(2.0).to_string());
    }
}
