use anyhow::Result;
use odocs_client::DocsResolver;
use odocs_core::DetectedPackage;
use serde_json::Value;
use std::sync::Arc;

pub mod docs;
pub mod inject;
pub mod packages;

pub use docs::PackageDocsTool;
pub use inject::InjectContextTool;
pub use packages::ListPackagesTool;

/// Shared state handed to every tool invocation
#[derive(Clone)]
pub struct ServerState {
    pub resolver: Arc<DocsResolver>,
    pub packages: Arc<Vec<DetectedPackage>>,
}

#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    async fn execute(&self, params: Value, state: &ServerState) -> Result<Value>;

    fn description(&self) -> &str;
    fn parameters_schema(&self) -> Value;
}
