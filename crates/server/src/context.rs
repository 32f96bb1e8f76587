use odocs_client::DocsResolver;
use odocs_core::DetectedPackage;
use regex::RegexBuilder;
use tracing::{debug, warn};

/// Context returned when no detected package is mentioned in a query,
/// or when every mentioned package failed to resolve.
pub const NO_CONTEXT_MESSAGE: &str =
    "No package-specific documentation available for this query.";

/// Find which detected packages a free-text query mentions.
///
/// Word-boundary, case-insensitive match on the package name, so
/// "Next.js" and "NEXT" both mention `next`.
pub fn extract_package_mentions<'a>(
    query: &str,
    packages: &'a [DetectedPackage],
) -> Vec<&'a DetectedPackage> {
    packages
        .iter()
        .filter(|pkg| {
            let pattern = format!(r"\b{}\b", regex::escape(&pkg.name));
            RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map(|re| re.is_match(query))
                .unwrap_or(false)
        })
        .collect()
}

/// Compose a documentation context blob for the packages a query
/// mentions.
///
/// Contract of this boundary: composition is partial-failure tolerant.
/// Each mentioned package is resolved at its detected (installed)
/// version; failures are logged and dropped so one broken package never
/// empties the context for the rest.
pub async fn compose_context(
    query: &str,
    packages: &[DetectedPackage],
    resolver: &DocsResolver,
) -> String {
    let mentioned = extract_package_mentions(query, packages);
    if mentioned.is_empty() {
        debug!("Query mentions no detected package");
        return NO_CONTEXT_MESSAGE.to_string();
    }

    let mut sections = Vec::with_capacity(mentioned.len());
    for pkg in mentioned {
        match resolver.resolve(&pkg.name, &pkg.version).await {
            Ok(doc) => {
                sections.push(format!(
                    "Documentation for {}@{}:\n{}",
                    doc.package, doc.version, doc.content
                ));
            }
            Err(e) => {
                warn!(
                    package = %pkg.name,
                    version = %pkg.version,
                    error = %e,
                    "Dropping package from context"
                );
            }
        }
    }

    if sections.is_empty() {
        NO_CONTEXT_MESSAGE.to_string()
    } else {
        sections.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odocs_cache::DocsCache;
    use odocs_client::source::{LocalPathSource, SourceChain};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn detected(name: &str, version: &str) -> DetectedPackage {
        DetectedPackage {
            name: name.to_string(),
            version: version.to_string(),
            installed_path: PathBuf::from("/project/node_modules").join(name),
        }
    }

    fn write_fixture(root: &Path, pkg: &str, ver: &str, content: &str) {
        let dir = root.join(pkg).join(ver);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("documentation.md"), content).unwrap();
    }

    fn local_resolver(root: &Path, cache_dir: &Path) -> DocsResolver {
        DocsResolver::new(
            SourceChain::new(vec![Box::new(LocalPathSource::new(root))]),
            DocsCache::open(cache_dir).unwrap(),
        )
    }

    #[test]
    fn test_mention_extraction_is_case_insensitive() {
        let packages = vec![detected("hono", "4.7.5"), detected("next", "15.0.0")];

        let mentioned = extract_package_mentions("How do I route in Hono?", &packages);
        assert_eq!(mentioned.len(), 1);
        assert_eq!(mentioned[0].name, "hono");

        let mentioned = extract_package_mentions("Middleware in Next.js and HONO", &packages);
        assert_eq!(mentioned.len(), 2);
    }

    #[test]
    fn test_mention_requires_word_boundary() {
        let packages = vec![detected("react", "19.0.0")];
        let mentioned = extract_package_mentions("I love preact", &packages);
        assert!(mentioned.is_empty());
    }

    #[tokio::test]
    async fn test_compose_with_no_mentions() {
        let root = TempDir::new().unwrap();
        let cache_dir = TempDir::new().unwrap();
        let resolver = local_resolver(root.path(), cache_dir.path());
        let packages = vec![detected("hono", "4.7.5")];

        let context = compose_context("What is a monad?", &packages, &resolver).await;
        assert_eq!(context, NO_CONTEXT_MESSAGE);
    }

    #[tokio::test]
    async fn test_compose_concatenates_mentioned_packages() {
        let root = TempDir::new().unwrap();
        let cache_dir = TempDir::new().unwrap();
        write_fixture(root.path(), "hono", "4.7.5", "hono body");
        write_fixture(root.path(), "react", "19.0.0", "react body");

        let resolver = local_resolver(root.path(), cache_dir.path());
        let packages = vec![detected("hono", "4.7.5"), detected("react", "19.0.0")];

        let context =
            compose_context("Using react inside hono templates", &packages, &resolver).await;
        assert!(context.contains("Documentation for hono@4.7.5:\nhono body"));
        assert!(context.contains("Documentation for react@19.0.0:\nreact body"));
    }

    #[tokio::test]
    async fn test_compose_drops_failing_packages() {
        let root = TempDir::new().unwrap();
        let cache_dir = TempDir::new().unwrap();
        write_fixture(root.path(), "hono", "4.7.5", "hono body");
        // No fixture for next: resolution fails and is dropped.

        let resolver = local_resolver(root.path(), cache_dir.path());
        let packages = vec![detected("hono", "4.7.5"), detected("next", "15.0.0")];

        let context = compose_context("hono and next together", &packages, &resolver).await;
        assert!(context.contains("hono body"));
        assert!(!context.contains("next"));
    }

    #[tokio::test]
    async fn test_compose_all_failures_yields_fallback_message() {
        let root = TempDir::new().unwrap();
        let cache_dir = TempDir::new().unwrap();
        let resolver = local_resolver(root.path(), cache_dir.path());
        let packages = vec![detected("hono", "4.7.5")];

        let context = compose_context("hono please", &packages, &resolver).await;
        assert_eq!(context, NO_CONTEXT_MESSAGE);
    }
}
