use crate::tools::{ServerState, ToolHandler};
use anyhow::Result;
use serde_json::Value;
use tracing::trace;

/// Lists the packages detected in the surrounding project, with their
/// installed versions.
pub struct ListPackagesTool;

impl ListPackagesTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ToolHandler for ListPackagesTool {
    async fn execute(&self, _params: Value, state: &ServerState) -> Result<Value> {
        trace!("Executing list_packages tool");
        Ok(serde_json::json!({ "packages": state.packages.as_ref() }))
    }

    fn description(&self) -> &str {
        "List the packages detected in the current project together with their installed versions."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false
        })
    }
}

impl Default for ListPackagesTool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odocs_cache::DocsCache;
    use odocs_client::source::SourceChain;
    use odocs_client::DocsResolver;
    use odocs_core::DetectedPackage;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_lists_detected_packages() {
        let cache_dir = TempDir::new().unwrap();
        let state = ServerState {
            resolver: Arc::new(DocsResolver::new(
                SourceChain::new(Vec::new()),
                DocsCache::open(cache_dir.path()).unwrap(),
            )),
            packages: Arc::new(vec![DetectedPackage {
                name: "hono".to_string(),
                version: "4.7.5".to_string(),
                installed_path: PathBuf::from("/p/node_modules/hono"),
            }]),
        };

        let result = ListPackagesTool::new()
            .execute(serde_json::json!({}), &state)
            .await
            .unwrap();
        assert_eq!(result["packages"][0]["name"], "hono");
        assert_eq!(result["packages"][0]["version"], "4.7.5");
    }
}
