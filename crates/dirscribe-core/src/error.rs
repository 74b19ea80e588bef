//! Error types for walking and concatenation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a walk or concatenation.
#[derive(Debug, Error)]
pub enum WalkError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the output stream failed.
    #[error("Failed to write output: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },

    /// Depth input was not a non-negative integer.
    #[error("Invalid depth value: {input:?}")]
    InvalidDepth { input: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// JSON encoding failed.
    #[error("Failed to encode JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl WalkError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

impl From<std::io::Error> for WalkError {
    fn from(source: std::io::Error) -> Self {
        Self::Write { source }
    }
}

/// Check that a user-supplied root exists before any traversal starts.
pub fn ensure_exists(path: impl Into<PathBuf>) -> Result<PathBuf, WalkError> {
    let path = path.into();
    if path.exists() {
        Ok(path)
    } else {
        Err(WalkError::NotFound { path })
    }
}

/// Kind of walk warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// A directory could not be listed and was treated as empty.
    UnreadableDirectory,
    /// Permission was denied reading a file.
    PermissionDenied,
    /// Any other error reading a file.
    ReadError,
}

/// Non-fatal failure swallowed during a walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl WalkWarning {
    /// Create a new walk warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// A directory whose listing failed.
    pub fn unreadable_directory(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Cannot list {}: {error}", path.display()),
            path,
            kind: WarningKind::UnreadableDirectory,
        }
    }

    /// A file read failure, classified by its I/O error kind.
    pub fn read_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => Self {
                message: format!("Permission denied: {}", path.display()),
                path,
                kind: WarningKind::PermissionDenied,
            },
            _ => Self {
                message: format!("Error processing {}: {error}", path.display()),
                path,
                kind: WarningKind::ReadError,
            },
        }
    }
}
