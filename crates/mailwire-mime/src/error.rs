//! Error types for address and MIME operations.

/// Result type alias for address and MIME operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Address and MIME error types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Invalid content type.
    #[error("Invalid content type: {0}")]
    InvalidContentType(String),
}
