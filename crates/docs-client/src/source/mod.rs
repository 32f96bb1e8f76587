use async_trait::async_trait;
use odocs_core::{Documentation, LatestPointer, PackageName, Version};
use thiserror::Error;

pub mod chain;
pub mod local;
pub mod remote;

pub use chain::SourceChain;
pub use local::LocalPathSource;
pub use remote::RemoteOriginSource;

/// Failure of a single source attempt.
///
/// Both variants make the chain move on to the next source; they differ
/// only in how loudly the chain logs them. Neither is ever surfaced to a
/// resolve caller directly.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source definitively does not have the requested record
    #[error("record not found")]
    NotFound,

    /// The source could not be consulted (I/O, transport, bad payload)
    #[error("source unavailable: {reason}")]
    Unavailable { reason: String },
}

impl SourceError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

/// An origin capable of producing documentation bodies and latest-pointer
/// records. Sources are stateless aside from their configured root or
/// base URL and are tried by [`SourceChain`] in a fixed priority order.
#[async_trait]
pub trait DocSource: Send + Sync {
    /// Location string used in logs and NotFound diagnostics
    fn describe(&self) -> String;

    /// Fetch the documentation body for a concrete `(package, version)`
    async fn fetch_docs(
        &self,
        package: &PackageName,
        version: &Version,
    ) -> Result<Documentation, SourceError>;

    /// Fetch the per-package latest pointer record
    async fn fetch_latest_pointer(
        &self,
        package: &PackageName,
    ) -> Result<LatestPointer, SourceError>;
}
