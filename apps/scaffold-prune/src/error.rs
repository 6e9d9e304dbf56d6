//! Error taxonomy for the pruning pass.
//!
//! A missing removal *target* is never an error: editor operations report it
//! as `Ok(false)`. Everything here is fatal and aborts the pass.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PruneError {
    /// The build configuration document could not be parsed.
    #[error("malformed document {}: {message}", path.display())]
    MalformedInput { path: PathBuf, message: String },

    /// A file the rules require (manifest, build config) does not exist.
    #[error("required file not found: {}", .0.display())]
    MissingRequiredInput(PathBuf),

    /// The answers blob is unusable.
    #[error("invalid answers: {0}")]
    InvalidAnswers(String),

    #[error("invalid glob pattern {pattern}: {message}")]
    Pattern { pattern: String, message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialize(String),
}

pub type Result<T> = std::result::Result<T, PruneError>;

impl PruneError {
    pub fn invalid_answers(msg: impl Into<String>) -> Self {
        Self::InvalidAnswers(msg.into())
    }

    /// Wrap an I/O error, mapping `NotFound` to `MissingRequiredInput`.
    pub fn required(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::MissingRequiredInput(path.to_path_buf())
        } else {
            Self::io(path, source)
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Exit code used by the binary: 2 for usage/answers problems, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidAnswers(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_maps_not_found() {
        let err = PruneError::required(
            Path::new("requirements.txt"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, PruneError::MissingRequiredInput(_)));
        assert_eq!(err.exit_code(), 1);

        let err = PruneError::required(
            Path::new("requirements.txt"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(matches!(err, PruneError::Io { .. }));
    }

    #[test]
    fn test_invalid_answers_exit_code() {
        assert_eq!(PruneError::invalid_answers("x").exit_code(), 2);
    }
}
