//! Catalog error types for typed error handling.
//!
//! Backends report failures as `anyhow::Error` with context attached; the
//! store wrappers and the catalog service classify them into [`Error`] so the
//! routing layer can map each class to a transport status.

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Catalog errors, one variant per failure class.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Malformed caller input (empty keyword, bad id, bad image reference).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Id lookup miss or a search without matches.
    #[error("not found: {0}")]
    NotFound(String),

    /// Failure reading or writing the image objects or the catalog backing store.
    #[error("storage error: {0:#}")]
    Storage(anyhow::Error),

    /// Schema or document initialization failed at process start.
    #[error("startup failed: {0:#}")]
    Startup(anyhow::Error),
}

impl Error {
    /// Create an invalid argument error.
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    /// Create a not found error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Wrap a backend failure raised while opening a store.
    pub fn startup(source: anyhow::Error) -> Self {
        Self::Startup(source)
    }

    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidArgument(_) => 400,
            Self::NotFound(_) => 404,
            Self::Storage(_) | Self::Startup(_) => 500,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(source: anyhow::Error) -> Self {
        Self::Storage(source)
    }
}
