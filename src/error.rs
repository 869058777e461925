//! Error types for doschema.

use crate::compat::Incompatibility;
use crate::fieldpath::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for doschema operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error is the umbrella for everything doschema can fail with.
#[derive(Debug, Error)]
pub enum Error {
    /// Two schemas declare different types at the same field path.
    #[error(transparent)]
    Incompatible(Box<Incompatibility>),

    /// A schema node does not have the shape the walker requires.
    #[error("{path}: invalid schema: {message}")]
    InvalidInput { path: Path, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates an invalid input error.
    pub fn invalid_input(path: Path, message: impl Into<String>) -> Self {
        Error::InvalidInput {
            path,
            message: message.into(),
        }
    }

    /// Returns the incompatibility if this error reports one.
    pub fn as_incompatibility(&self) -> Option<&Incompatibility> {
        match self {
            Error::Incompatible(incompatibility) => Some(incompatibility),
            _ => None,
        }
    }

    /// Returns true if this error is a type conflict between schemas.
    pub fn is_incompatible(&self) -> bool {
        matches!(self, Error::Incompatible(_))
    }
}

impl From<Incompatibility> for Error {
    fn from(incompatibility: Incompatibility) -> Self {
        Error::Incompatible(Box::new(incompatibility))
    }
}
