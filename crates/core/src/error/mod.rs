mod cache;
mod docs;
mod network;

pub use cache::CacheError;
pub use docs::DocsError;
pub use network::NetworkError;

use thiserror::Error;

/// Main error type that encompasses all domain-specific errors
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Docs(#[from] DocsError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parsing error")]
    UrlParse(#[from] url::ParseError),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Check whether this error is a not-found class failure (exhausted
    /// sources or a missing latest pointer), as opposed to an unexpected
    /// one. The serving layer maps these to its 404-equivalent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Docs(e) if e.is_not_found())
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Docs(_) => ErrorCategory::Documentation,
            Error::Cache(_) => ErrorCategory::Cache,
            Error::Network(_) => ErrorCategory::Network,
            Error::Serialization(_) | Error::UrlParse(_) => ErrorCategory::Data,
            Error::Io(_) => ErrorCategory::Io,
            Error::Internal(_) => ErrorCategory::Internal,
        }
    }
}

impl From<crate::types::PackageNameError> for Error {
    fn from(err: crate::types::PackageNameError) -> Self {
        Error::Docs(DocsError::InvalidPackageName(err))
    }
}

impl From<crate::types::VersionError> for Error {
    fn from(err: crate::types::VersionError) -> Self {
        Error::Docs(DocsError::InvalidSpecifier(err))
    }
}

/// Error categories for classification in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Documentation,
    Cache,
    Network,
    Data,
    Io,
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Documentation => write!(f, "documentation"),
            ErrorCategory::Cache => write!(f, "cache"),
            ErrorCategory::Network => write!(f, "network"),
            ErrorCategory::Data => write!(f, "data"),
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Internal => write!(f, "internal"),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;
