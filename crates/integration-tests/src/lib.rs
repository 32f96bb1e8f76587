//! Shared fixtures for the workspace integration tests.
//!
//! Everything is hermetic: documentation sources and the cache live in
//! per-test temporary directories, no network is involved.

use odocs_cache::DocsCache;
use odocs_client::source::{DocSource, LocalPathSource, SourceChain};
use odocs_client::DocsResolver;
use std::path::Path;
use tempfile::TempDir;

/// A documentation source root plus a cache directory, both temporary.
pub struct DocsFixture {
    pub roots: Vec<TempDir>,
    pub cache_dir: TempDir,
}

impl DocsFixture {
    /// Fixture with `root_count` empty source roots
    pub fn new(root_count: usize) -> Self {
        Self {
            roots: (0..root_count).map(|_| TempDir::new().unwrap()).collect(),
            cache_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self, index: usize) -> &Path {
        self.roots[index].path()
    }

    /// Write a documentation body under one of the source roots
    pub fn write_docs(&self, root_index: usize, package: &str, version: &str, content: &str) {
        let dir = self.root(root_index).join(package).join(version);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("documentation.md"), content).unwrap();
    }

    /// Write a latest-pointer record under one of the source roots
    pub fn write_pointer(&self, root_index: usize, package: &str, version: &str) {
        let dir = self.root(root_index).join(package);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("latest.json"),
            format!(r#"{{"version": "{version}"}}"#),
        )
        .unwrap();
    }

    /// Path where the cache entry for `(package, version)` would live
    pub fn cache_entry_path(&self, package: &str, version: &str) -> std::path::PathBuf {
        self.cache_dir
            .path()
            .join(format!("{package}-{version}.json"))
    }

    /// Build a resolver over all fixture roots in order
    pub fn resolver(&self) -> DocsResolver {
        let sources: Vec<Box<dyn DocSource>> = self
            .roots
            .iter()
            .map(|root| Box::new(LocalPathSource::new(root.path())) as Box<dyn DocSource>)
            .collect();
        DocsResolver::new(
            SourceChain::new(sources),
            DocsCache::open(self.cache_dir.path()).unwrap(),
        )
    }
}
