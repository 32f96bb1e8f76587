use crate::{Cache, CacheStats};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use odocs_core::{error::CacheError, Documentation, PackageName, Version};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::RwLock;
use tracing::{debug, trace, warn};

/// Maximum age in seconds before a cache entry is treated as a miss (7 days)
pub const DEFAULT_STALENESS_SECS: i64 = 7 * 24 * 60 * 60;

/// Default staleness threshold as a [`chrono::Duration`]
pub fn default_staleness_threshold() -> Duration {
    Duration::seconds(DEFAULT_STALENESS_SECS)
}

/// On-disk record wrapping a documentation body with its write time.
/// The record fields stay flattened at the JSON top level, so the file
/// remains a plain `{package, version, content}` record plus `stored_at`.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    stored_at: DateTime<Utc>,
    #[serde(flatten)]
    record: Documentation,
}

/// Disk-backed documentation cache.
///
/// One JSON file per `(package, version)` key at
/// `<root>/<package>-<version>.json`. Writes go through a temp file in
/// the same directory and a rename, so a concurrent reader never sees a
/// partial record; last writer wins. Stale entries are never deleted,
/// only ignored and eventually overwritten.
pub struct DocsCache {
    root: PathBuf,
    staleness_threshold: Duration,
    stats: Arc<RwLock<CacheStats>>,
}

impl DocsCache {
    /// Open a cache rooted at `root`, creating the directory if absent.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, CacheError> {
        Self::with_staleness_threshold(root, default_staleness_threshold())
    }

    /// Open a cache with a non-default staleness threshold.
    pub fn with_staleness_threshold<P: AsRef<Path>>(
        root: P,
        staleness_threshold: Duration,
    ) -> Result<Self, CacheError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root).map_err(|e| CacheError::directory_failed(&root, e))?;

        debug!(root = %root.display(), "Opened documentation cache");

        Ok(Self {
            root,
            staleness_threshold,
            stats: Arc::new(RwLock::new(CacheStats::default())),
        })
    }

    /// Get the cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the entry for a `(package, version)` key
    pub fn entry_path(&self, package: &PackageName, version: &Version) -> PathBuf {
        self.root.join(format!("{package}-{version}.json"))
    }
}

#[async_trait]
impl Cache for DocsCache {
    type Key = (PackageName, Version);
    type Value = Documentation;
    type Error = CacheError;

    async fn get(&self, key: &Self::Key) -> Result<Option<Self::Value>, Self::Error> {
        let (package, version) = key;
        let path = self.entry_path(package, version);
        let mut stats = self.stats.write().await;

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(%package, %version, "Cache miss: no entry");
                stats.misses += 1;
                return Ok(None);
            }
            Err(e) => return Err(CacheError::read_failed(path, e)),
        };

        let entry: CacheEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                // Unreadable entries count as misses and get overwritten
                // by the next insert for this key.
                warn!(%package, %version, error = %e, "Discarding unparseable cache entry");
                stats.misses += 1;
                return Ok(None);
            }
        };

        let age = Utc::now().signed_duration_since(entry.stored_at);
        if age > self.staleness_threshold {
            debug!(%package, %version, age_hours = age.num_hours(), "Cache entry is stale");
            stats.misses += 1;
            return Ok(None);
        }

        trace!(%package, %version, "Cache hit");
        stats.hits += 1;
        Ok(Some(entry.record))
    }

    async fn insert(&self, key: Self::Key, value: Self::Value) -> Result<(), Self::Error> {
        let (package, version) = key;
        let path = self.entry_path(&package, &version);

        let entry = CacheEntry {
            stored_at: Utc::now(),
            record: value,
        };
        let data = serde_json::to_vec(&entry)?;

        let root = self.root.clone();
        let target = path.clone();
        tokio::task::spawn_blocking(move || -> Result<(), CacheError> {
            let mut tmp = NamedTempFile::new_in(&root)
                .map_err(|e| CacheError::write_failed(&target, e))?;
            tmp.write_all(&data)
                .map_err(|e| CacheError::write_failed(&target, e))?;
            tmp.persist(&target)
                .map_err(|e| CacheError::write_failed(&target, e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| {
            CacheError::write_failed(&path, std::io::Error::new(std::io::ErrorKind::Other, e))
        })??;

        trace!(%package, %version, path = %path.display(), "Cache entry written");
        Ok(())
    }

    fn stats(&self) -> CacheStats {
        self.stats
            .try_read()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}
