use crate::tools::{ServerState, ToolHandler};
use anyhow::Result;
use odocs_core::DEFAULT_SPECIFIER;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

/// Input parameters for the get_package_docs tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDocsInput {
    /// Name of the package (required)
    pub package: String,
    /// Version specifier (optional, defaults to latest)
    pub version: Option<String>,
}

impl PackageDocsInput {
    fn specifier(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_SPECIFIER)
    }
}

/// Serves version-pinned documentation for one package. Success bodies
/// are `{package, version, content}`; not-found failures carry the
/// package and version in their message.
pub struct PackageDocsTool;

impl PackageDocsTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ToolHandler for PackageDocsTool {
    async fn execute(&self, params: Value, state: &ServerState) -> Result<Value> {
        trace!("Executing get_package_docs tool with params: {}", params);

        let input: PackageDocsInput = serde_json::from_value(params)
            .map_err(|e| anyhow::anyhow!("Invalid parameters for get_package_docs: {e}"))?;

        debug!(
            package = %input.package,
            version = ?input.version,
            "Processing package docs request"
        );

        let doc = state.resolver.resolve(&input.package, input.specifier()).await?;
        Ok(serde_json::to_value(doc)?)
    }

    fn description(&self) -> &str {
        "Fetch version-pinned documentation for a package. Returns the package name, the concrete version the specifier resolved to, and the markdown documentation body."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "package": {
                    "type": "string",
                    "description": "Name of the package (e.g., \"hono\", \"react\")",
                    "minLength": 1,
                    "pattern": "^[a-zA-Z0-9._-]+$"
                },
                "version": {
                    "type": "string",
                    "description": "Optional version (defaults to latest)",
                    "examples": ["4.7.5", "latest"]
                }
            },
            "required": ["package"],
            "additionalProperties": false
        })
    }
}

impl Default for PackageDocsTool {
    fn default() -> Self {
        Self::new()
    }
}
