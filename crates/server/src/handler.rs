use anyhow::Result;
use async_trait::async_trait;
use rust_mcp_sdk::mcp_server::ServerHandler;
use rust_mcp_sdk::{
    schema::{
        schema_utils::CallToolError, CallToolRequest, CallToolResult, ListToolsRequest,
        ListToolsResult, RpcError, Tool,
    },
    McpServer,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

use odocs_client::DocsResolver;
use odocs_core::DetectedPackage;

use crate::config::Config;
use crate::tools::{InjectContextTool, ListPackagesTool, PackageDocsTool, ServerState, ToolHandler};

/// MCP request handler wiring the serving layer to the resolver.
///
/// Carries the detected-package set from startup and a single resolver
/// shared by every tool; resolve calls for distinct keys may run
/// concurrently, the disk cache's rename-based writes keep that safe.
pub struct OdocsHandler {
    state: ServerState,
    #[allow(dead_code)]
    config: Config,
}

impl OdocsHandler {
    pub fn new(config: Config, packages: Vec<DetectedPackage>) -> Result<Self> {
        config.validate()?;

        let resolver = Arc::new(DocsResolver::from_config(&config.client_config())?);

        info!(
            name = %config.server.name,
            version = %config.server.version,
            packages = packages.len(),
            "Initialized ODocs handler"
        );

        Ok(Self {
            state: ServerState {
                resolver,
                packages: Arc::new(packages),
            },
            config,
        })
    }

    /// The resolver shared with the tools, for startup prefetching
    pub fn resolver(&self) -> Arc<DocsResolver> {
        Arc::clone(&self.state.resolver)
    }

    fn create_tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: "list_packages".to_string(),
                description: Some(ListPackagesTool::new().description().to_string()),
                input_schema: serde_json::from_value(ListPackagesTool::new().parameters_schema())
                    .unwrap(),
                annotations: None,
            },
            Tool {
                name: "get_package_docs".to_string(),
                description: Some(PackageDocsTool::new().description().to_string()),
                input_schema: serde_json::from_value(PackageDocsTool::new().parameters_schema())
                    .unwrap(),
                annotations: None,
            },
            Tool {
                name: "inject_context".to_string(),
                description: Some(InjectContextTool::new().description().to_string()),
                input_schema: serde_json::from_value(InjectContextTool::new().parameters_schema())
                    .unwrap(),
                annotations: None,
            },
        ]
    }

    async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
        match tool_name {
            "list_packages" => ListPackagesTool::new().execute(params, &self.state).await,
            "get_package_docs" => PackageDocsTool::new().execute(params, &self.state).await,
            "inject_context" => InjectContextTool::new().execute(params, &self.state).await,
            _ => Err(anyhow::anyhow!("Unknown tool: {}", tool_name)),
        }
    }
}

#[async_trait]
impl ServerHandler for OdocsHandler {
    async fn handle_list_tools_request(
        &self,
        _request: ListToolsRequest,
        _runtime: &dyn McpServer,
    ) -> std::result::Result<ListToolsResult, RpcError> {
        debug!("Handling list_tools request");

        let tools = self.create_tools();
        Ok(ListToolsResult {
            tools,
            meta: None,
            next_cursor: None,
        })
    }

    async fn handle_call_tool_request(
        &self,
        request: CallToolRequest,
        _runtime: &dyn McpServer,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        debug!("Handling call_tool request for: {}", request.params.name);

        let params = match &request.params.arguments {
            Some(args_map) => Value::Object(args_map.clone()),
            None => Value::Object(serde_json::Map::new()),
        };

        match self.execute_tool(&request.params.name, params).await {
            Ok(result) => Ok(CallToolResult::text_content(
                serde_json::to_string_pretty(&result).map_err(|e| {
                    error!("Failed to serialize tool result: {}", e);
                    CallToolError::new(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("Serialization error: {e}"),
                    ))
                })?,
                None,
            )),
            Err(e) => {
                error!("Tool execution failed for {}: {}", request.params.name, e);
                Err(CallToolError::new(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Tool execution error: {e}"),
                )))
            }
        }
    }
}
