use crate::types::{PackageName, PackageNameError, Version, VersionError};
use thiserror::Error;

/// Documentation resolution errors.
///
/// `NotFound` and `LatestPointerNotFound` are the fatal outcomes of an
/// exhausted source chain; per-source failures are never surfaced here.
#[derive(Error, Debug)]
pub enum DocsError {
    #[error("Documentation not found for {package}@{version} (tried: {})", attempted.join(", "))]
    NotFound {
        package: PackageName,
        version: Version,
        attempted: Vec<String>,
    },

    #[error("Could not resolve latest version for {package} (tried: {})", attempted.join(", "))]
    LatestPointerNotFound {
        package: PackageName,
        attempted: Vec<String>,
    },

    #[error("Invalid package name")]
    InvalidPackageName(#[from] PackageNameError),

    #[error("Invalid version specifier")]
    InvalidSpecifier(#[from] VersionError),

    #[error("Failed to resolve {package}: {reason}")]
    ResolutionFailed { package: PackageName, reason: String },
}

impl DocsError {
    pub fn not_found(package: PackageName, version: Version, attempted: Vec<String>) -> Self {
        Self::NotFound {
            package,
            version,
            attempted,
        }
    }

    pub fn latest_pointer_not_found(package: PackageName, attempted: Vec<String>) -> Self {
        Self::LatestPointerNotFound { package, attempted }
    }

    pub fn resolution_failed(package: PackageName, reason: impl Into<String>) -> Self {
        Self::ResolutionFailed {
            package,
            reason: reason.into(),
        }
    }

    /// Not-found class failures are surfaced to callers as the
    /// 404-equivalent; everything else is unexpected.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DocsError::NotFound { .. } | DocsError::LatestPointerNotFound { .. }
        )
    }
}
