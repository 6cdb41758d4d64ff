//! Provides the error type used throughout this crate.

use crate::NodeKey;
use thiserror::Error;

/// The error type used throughout this crate
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Key `{0}` does not exist")]
    KeyNotFound(NodeKey),
    /// Raised when untyped data does not describe a node record. `path` points at the
    /// offending record, e.g. `$.children.a`.
    #[error("Malformed node record at {path}: {reason}")]
    MalformedInput { path: String, reason: String },
    // Errors specific to the json backend
    #[cfg(feature = "json")]
    #[error("Error raised by `serde_json`: {0}")]
    Json(#[from] serde_json::Error),
}

pub type TreeResult<T> = Result<T, TreeError>;

impl TreeError {
    pub(crate) fn malformed(path: &str, reason: impl Into<String>) -> Self {
        TreeError::MalformedInput {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
