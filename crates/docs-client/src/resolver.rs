use crate::config::ClientConfig;
use crate::source::{DocSource, LocalPathSource, RemoteOriginSource, SourceChain};
use odocs_cache::{Cache, DocsCache};
use odocs_core::{
    is_latest_specifier, normalize_specifier, Documentation, PackageName, Result, Version,
};
use tracing::{debug, warn};

/// Documentation resolution orchestrator.
///
/// Given a package and a version specifier it resolves `"latest"` when
/// needed, consults the injected cache, falls through the source chain
/// and writes successful fetches back. Cache trouble never fails a
/// resolve; it is logged and degraded to a miss, so only source-chain
/// exhaustion decides the outcome.
pub struct DocsResolver {
    chain: SourceChain,
    cache: DocsCache,
}

impl DocsResolver {
    pub fn new(chain: SourceChain, cache: DocsCache) -> Self {
        Self { chain, cache }
    }

    /// Build a resolver from configuration: one local source per
    /// configured root, then the remote origin when a base URL is set.
    /// Opens (and creates if absent) the cache directory.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut sources: Vec<Box<dyn DocSource>> = Vec::new();
        for root in &config.local_roots {
            sources.push(Box::new(LocalPathSource::new(root)));
        }
        if let Some(base_url) = &config.remote_base_url {
            sources.push(Box::new(RemoteOriginSource::new(
                base_url.clone(),
                config.timeout(),
                config.user_agent.clone(),
            )?));
        }

        let chain = SourceChain::new(sources);
        let cache = DocsCache::open(&config.cache_dir)?;

        debug!(
            sources = ?chain.describe_sources(),
            cache_root = %cache.root().display(),
            "Constructed documentation resolver"
        );

        Ok(Self::new(chain, cache))
    }

    pub fn cache(&self) -> &DocsCache {
        &self.cache
    }

    pub fn chain(&self) -> &SourceChain {
        &self.chain
    }

    /// Resolve `(package, specifier)` to a documentation body.
    ///
    /// The specifier is either `"latest"` (resolved through the chain's
    /// latest pointers on every call) or a concrete version. Range
    /// specifiers are not expanded here; `satisfies_version` remains a
    /// separate utility for callers that validate candidates.
    pub async fn resolve(&self, package: &str, specifier: &str) -> Result<Documentation> {
        let package = PackageName::new(package)?;
        let specifier = normalize_specifier(specifier);

        let version = if is_latest_specifier(&specifier) {
            let resolved = self.chain.resolve_latest(&package).await?;
            debug!(%package, version = %resolved, "Resolved \"latest\" specifier");
            resolved
        } else {
            Version::new(specifier)?
        };

        let key = (package.clone(), version.clone());
        match self.cache.get(&key).await {
            Ok(Some(doc)) => {
                debug!(%package, %version, "Serving documentation from cache");
                return Ok(doc);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(%package, %version, error = %e, "Cache read failed, treating as miss");
            }
        }

        let doc = self.chain.fetch_docs(&package, &version).await?;

        if let Err(e) = self.cache.insert(key, doc.clone()).await {
            warn!(%package, %version, error = %e, "Failed to write documentation to cache");
        }

        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_fixture(root: &Path, pkg: &str, ver: &str, content: &str) {
        let dir = root.join(pkg).join(ver);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("documentation.md"), content).unwrap();
    }

    fn write_pointer(root: &Path, pkg: &str, ver: &str) {
        let dir = root.join(pkg);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("latest.json"),
            format!(r#"{{"version": "{ver}"}}"#),
        )
        .unwrap();
    }

    fn resolver_with_roots(roots: &[&Path], cache_dir: &Path) -> DocsResolver {
        let sources: Vec<Box<dyn DocSource>> = roots
            .iter()
            .map(|root| Box::new(LocalPathSource::new(root)) as Box<dyn DocSource>)
            .collect();
        DocsResolver::new(SourceChain::new(sources), DocsCache::open(cache_dir).unwrap())
    }

    #[tokio::test]
    async fn test_resolves_exact_version_and_populates_cache() {
        let root = TempDir::new().unwrap();
        let cache_dir = TempDir::new().unwrap();
        write_fixture(root.path(), "hono", "4.7.5", "# Hono\n");

        let resolver = resolver_with_roots(&[root.path()], cache_dir.path());
        let doc = resolver.resolve("hono", "4.7.5").await.unwrap();
        assert_eq!(doc.package, "hono");
        assert_eq!(doc.content, "# Hono\n");

        // Cache file exists at the documented layout afterwards.
        assert!(cache_dir.path().join("hono-4.7.5.json").exists());
    }

    #[tokio::test]
    async fn test_fresh_cache_hit_skips_sources() {
        let cache_dir = TempDir::new().unwrap();

        // Populate the cache, then resolve with an empty source chain:
        // a fresh hit must be terminal without any source traversal.
        {
            let cache = DocsCache::open(cache_dir.path()).unwrap();
            cache
                .insert(
                    (
                        PackageName::new("hono").unwrap(),
                        Version::new("4.7.5").unwrap(),
                    ),
                    Documentation::new("hono", "4.7.5", "cached"),
                )
                .await
                .unwrap();
        }

        let resolver = resolver_with_roots(&[], cache_dir.path());
        let doc = resolver.resolve("hono", "4.7.5").await.unwrap();
        assert_eq!(doc.content, "cached");
    }

    #[tokio::test]
    async fn test_falls_back_to_second_root() {
        let root_a = TempDir::new().unwrap();
        let root_b = TempDir::new().unwrap();
        let cache_dir = TempDir::new().unwrap();
        write_fixture(root_b.path(), "next", "15.0.0", "from fallback");

        let resolver = resolver_with_roots(&[root_a.path(), root_b.path()], cache_dir.path());
        let doc = resolver.resolve("next", "15.0.0").await.unwrap();
        assert_eq!(doc.content, "from fallback");
        assert!(cache_dir.path().join("next-15.0.0.json").exists());
    }

    #[tokio::test]
    async fn test_latest_resolves_through_pointer() {
        let root = TempDir::new().unwrap();
        let cache_dir = TempDir::new().unwrap();
        write_pointer(root.path(), "hono", "4.7.5");
        write_fixture(root.path(), "hono", "4.7.5", "# Hono 4.7.5\n");

        let resolver = resolver_with_roots(&[root.path()], cache_dir.path());
        let doc = resolver.resolve("hono", "latest").await.unwrap();

        // The body comes from the concrete version the pointer declares,
        // never from a key literally named "latest".
        assert_eq!(doc.version, "4.7.5");
        assert!(cache_dir.path().join("hono-4.7.5.json").exists());
        assert!(!cache_dir.path().join("hono-latest.json").exists());
    }

    #[tokio::test]
    async fn test_exhaustion_carries_package_and_version() {
        let root = TempDir::new().unwrap();
        let cache_dir = TempDir::new().unwrap();

        let resolver = resolver_with_roots(&[root.path()], cache_dir.path());
        let err = resolver.resolve("hono", "9.9.9").await.unwrap_err();

        assert!(err.is_not_found());
        let message = err.to_string();
        assert!(message.contains("hono"));
        assert!(message.contains("9.9.9"));
    }

    #[tokio::test]
    async fn test_missing_latest_pointer_is_not_found() {
        let root = TempDir::new().unwrap();
        let cache_dir = TempDir::new().unwrap();

        let resolver = resolver_with_roots(&[root.path()], cache_dir.path());
        let err = resolver.resolve("hono", "latest").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_package_name_is_resolution_error() {
        let cache_dir = TempDir::new().unwrap();
        let resolver = resolver_with_roots(&[], cache_dir.path());

        let err = resolver.resolve("", "1.0.0").await.unwrap_err();
        assert!(!err.is_not_found());

        let err = resolver.resolve("../etc", "1.0.0").await.unwrap_err();
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_empty_specifier_means_latest() {
        let root = TempDir::new().unwrap();
        let cache_dir = TempDir::new().unwrap();
        write_pointer(root.path(), "react", "19.0.0");
        write_fixture(root.path(), "react", "19.0.0", "react docs");

        let resolver = resolver_with_roots(&[root.path()], cache_dir.path());
        let doc = resolver.resolve("react", "").await.unwrap();
        assert_eq!(doc.version, "19.0.0");
    }
}
