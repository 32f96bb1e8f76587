use crate::source::{DocSource, SourceError};
use async_trait::async_trait;
use odocs_core::{Documentation, LatestPointer, PackageName, Version};
use std::path::{Path, PathBuf};
use tracing::{trace, warn};

/// Documentation source backed by one filesystem root.
///
/// Layout under the root: `<package>/<version>/documentation.md` for
/// bodies and `<package>/latest.json` for latest pointers. A chain is
/// typically configured with two of these (primary and fallback root)
/// ahead of the remote origin.
pub struct LocalPathSource {
    root: PathBuf,
}

impl LocalPathSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn docs_path(&self, package: &PackageName, version: &Version) -> PathBuf {
        self.root
            .join(package.as_str())
            .join(version.as_str())
            .join("documentation.md")
    }

    fn latest_pointer_path(&self, package: &PackageName) -> PathBuf {
        self.root.join(package.as_str()).join("latest.json")
    }

    async fn read(&self, path: &Path) -> Result<String, SourceError> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SourceError::NotFound),
            Err(e) => Err(SourceError::unavailable(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }
}

#[async_trait]
impl DocSource for LocalPathSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch_docs(
        &self,
        package: &PackageName,
        version: &Version,
    ) -> Result<Documentation, SourceError> {
        let path = self.docs_path(package, version);
        trace!(%package, %version, path = %path.display(), "Trying local documentation file");

        let content = self.read(&path).await?;
        Ok(Documentation::new(
            package.as_str(),
            version.as_str(),
            content,
        ))
    }

    async fn fetch_latest_pointer(
        &self,
        package: &PackageName,
    ) -> Result<LatestPointer, SourceError> {
        let path = self.latest_pointer_path(package);
        trace!(%package, path = %path.display(), "Trying local latest pointer");

        let content = self.read(&path).await?;
        serde_json::from_str(&content).map_err(|e| {
            warn!(%package, path = %path.display(), error = %e, "Malformed latest pointer");
            SourceError::unavailable(format!("malformed latest pointer at {}: {e}", path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn package(name: &str) -> PackageName {
        PackageName::new(name).unwrap()
    }

    fn version(v: &str) -> Version {
        Version::new(v).unwrap()
    }

    fn write_fixture(root: &Path, pkg: &str, ver: &str, content: &str) {
        let dir = root.join(pkg).join(ver);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("documentation.md"), content).unwrap();
    }

    #[tokio::test]
    async fn test_fetch_docs_from_root() {
        let temp_dir = TempDir::new().unwrap();
        write_fixture(temp_dir.path(), "hono", "4.7.5", "# Hono docs\n");

        let source = LocalPathSource::new(temp_dir.path());
        let doc = source
            .fetch_docs(&package("hono"), &version("4.7.5"))
            .await
            .unwrap();

        assert_eq!(doc.package, "hono");
        assert_eq!(doc.version, "4.7.5");
        assert_eq!(doc.content, "# Hono docs\n");
    }

    #[tokio::test]
    async fn test_missing_body_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let source = LocalPathSource::new(temp_dir.path());

        let err = source
            .fetch_docs(&package("hono"), &version("4.7.5"))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::NotFound));
    }

    #[tokio::test]
    async fn test_fetch_latest_pointer() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("hono");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("latest.json"), r#"{"version": "4.7.5"}"#).unwrap();

        let source = LocalPathSource::new(temp_dir.path());
        let pointer = source.fetch_latest_pointer(&package("hono")).await.unwrap();
        assert_eq!(pointer.version, "4.7.5");
    }

    #[tokio::test]
    async fn test_missing_pointer_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let source = LocalPathSource::new(temp_dir.path());

        let err = source
            .fetch_latest_pointer(&package("hono"))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::NotFound));
    }

    #[tokio::test]
    async fn test_malformed_pointer_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("hono");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("latest.json"), "{not json").unwrap();

        let source = LocalPathSource::new(temp_dir.path());
        let err = source
            .fetch_latest_pointer(&package("hono"))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Unavailable { .. }));
    }
}
