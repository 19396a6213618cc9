//! Error types for mesh loading.

use std::path::PathBuf;

use thiserror::Error;
use vertebra_types::MeshError;

/// Result type for mesh loading.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while loading a vertebra mesh.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Invalid file content.
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// A binary STL ended before its declared triangle count.
    #[error("binary STL declares {expected} triangles but holds {got}")]
    TruncatedBinary {
        /// Declared number of triangles.
        expected: u32,
        /// Complete triangles present.
        got: u32,
    },

    /// The weld tolerance is negative or not finite.
    #[error("weld epsilon must be finite and non-negative, got {value}")]
    InvalidWeldEpsilon {
        /// The rejected tolerance.
        value: f64,
    },

    /// The loaded triangles do not form a valid mesh.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Float parsing error.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}
