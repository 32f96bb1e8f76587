use crate::source::{DocSource, SourceError};
use odocs_core::{error::DocsError, Documentation, PackageName, Result, Version};
use tracing::{debug, warn};

/// Ordered set of documentation sources tried in sequence.
///
/// Individual source failures are swallowed here (not-found logged at
/// debug, transport trouble at warn) and the walk continues; only
/// exhaustion surfaces, as a NotFound-class error carrying every
/// attempted location for diagnostics.
pub struct SourceChain {
    sources: Vec<Box<dyn DocSource>>,
}

impl SourceChain {
    pub fn new(sources: Vec<Box<dyn DocSource>>) -> Self {
        Self { sources }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Locations of all configured sources, in priority order
    pub fn describe_sources(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.describe()).collect()
    }

    /// Fetch a documentation body from the first source that has it.
    pub async fn fetch_docs(
        &self,
        package: &PackageName,
        version: &Version,
    ) -> Result<Documentation> {
        let mut attempted = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let location = source.describe();
            match source.fetch_docs(package, version).await {
                Ok(doc) => {
                    debug!(%package, %version, source = %location, "Documentation fetched");
                    return Ok(doc);
                }
                Err(SourceError::NotFound) => {
                    debug!(%package, %version, source = %location, "Source has no documentation, trying next");
                }
                Err(SourceError::Unavailable { reason }) => {
                    warn!(%package, %version, source = %location, %reason, "Source unavailable, trying next");
                }
            }
            attempted.push(location);
        }

        Err(DocsError::not_found(package.clone(), version.clone(), attempted).into())
    }

    /// Resolve the symbolic `"latest"` specifier through the same
    /// source fallback. Pointer lookups are deliberately never cached,
    /// so every call hits the sources for freshness.
    pub async fn resolve_latest(&self, package: &PackageName) -> Result<Version> {
        let mut attempted = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let location = source.describe();
            match source.fetch_latest_pointer(package).await {
                Ok(pointer) => {
                    debug!(%package, version = %pointer.version, source = %location, "Latest pointer resolved");
                    return Version::new(&pointer.version).map_err(|e| {
                        DocsError::resolution_failed(
                            package.clone(),
                            format!("latest pointer declares an invalid version: {e}"),
                        )
                        .into()
                    });
                }
                Err(SourceError::NotFound) => {
                    debug!(%package, source = %location, "Source has no latest pointer, trying next");
                }
                Err(SourceError::Unavailable { reason }) => {
                    warn!(%package, source = %location, %reason, "Source unavailable for latest pointer, trying next");
                }
            }
            attempted.push(location);
        }

        Err(DocsError::latest_pointer_not_found(package.clone(), attempted).into())
    }
}
