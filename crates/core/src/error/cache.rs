use std::path::PathBuf;
use thiserror::Error;

/// Cache-related errors.
///
/// These never abort a resolve call: the resolver logs them and degrades
/// to a cache miss, so only the source chain decides the final outcome.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to read cache entry at {}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write cache entry at {}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create cache directory at {}", path.display())]
    DirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cache serialization failed")]
    Serialization(#[from] serde_json::Error),
}

impl CacheError {
    pub fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            source,
        }
    }

    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }

    pub fn directory_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryFailed {
            path: path.into(),
            source,
        }
    }
}
