use crate::context::compose_context;
use crate::tools::{ServerState, ToolHandler};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

/// Input parameters for the inject_context tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectContextInput {
    /// Free-text query to scan for package mentions
    pub query: String,
}

/// Builds a documentation context blob for the packages a free-text
/// query mentions, dropping (and logging) packages that fail to resolve.
pub struct InjectContextTool;

impl InjectContextTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ToolHandler for InjectContextTool {
    async fn execute(&self, params: Value, state: &ServerState) -> Result<Value> {
        trace!("Executing inject_context tool");

        let input: InjectContextInput = serde_json::from_value(params)
            .map_err(|e| anyhow::anyhow!("Invalid parameters for inject_context: {e}"))?;

        let context = compose_context(&input.query, &state.packages, &state.resolver).await;
        Ok(serde_json::json!({ "context": context }))
    }

    fn description(&self) -> &str {
        "Compose version-pinned documentation context for every detected package mentioned in a free-text query. Packages that fail to resolve are omitted from the context."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Free text to scan for package mentions",
                    "minLength": 1
                }
            },
            "required": ["query"],
            "additionalProperties": false
        })
    }
}

impl Default for InjectContextTool {
    fn default() -> Self {
        Self::new()
    }
}
