//! Error types for message building.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or serializing a message.
#[derive(Debug, Error)]
pub enum Error {
    /// Address normalization or content type parsing failed.
    #[error(transparent)]
    Mime(#[from] mailwire_mime::Error),

    /// The transmission format cannot express the requested feature.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// An argument was rejected (e.g. non-image content through the image path).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading attachment content failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
