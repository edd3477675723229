// ABOUTME: McpProxyTool wraps an MCP server tool for use in the registry.
// ABOUTME: Forwards calls to the server and maps results to ToolResult.

use std::sync::Arc;

use async_trait::async_trait;

use super::{McpClient, McpContentBlock, McpToolInfo};
use crate::tool::{Tool, ToolResult, ToolSpec};

/// A registry tool that proxies calls to an MCP server.
pub struct McpProxyTool {
    client: Arc<McpClient>,
    info: McpToolInfo,
    registered_name: String,
    spec: ToolSpec,
}

impl McpProxyTool {
    /// Create a new proxy tool.
    ///
    /// The registered name is normalized to the registry's lowercase
    /// underscore form (servers may use dashes or mixed case) and prefixed
    /// when a prefix is given.
    pub fn new(client: Arc<McpClient>, info: McpToolInfo, prefix: Option<&str>) -> Self {
        let registered_name = match prefix {
            Some(p) => normalize_name(&format!("{}_{}", p, info.name)),
            None => normalize_name(&info.name),
        };
        let spec = ToolSpec::from_json_schema(&info.input_schema);
        Self {
            client,
            info,
            registered_name,
            spec,
        }
    }

    /// The tool's name on the server, before normalization.
    pub fn server_name(&self) -> &str {
        &self.info.name
    }
}

fn normalize_name(raw: &str) -> String {
    raw.chars()
        .map(|c| match c.to_ascii_lowercase() {
            c @ ('a'..='z' | '0'..='9') => c,
            _ => '_',
        })
        .collect()
}

#[async_trait]
impl Tool for McpProxyTool {
    fn name(&self) -> &str {
        &self.registered_name
    }

    fn description(&self) -> &str {
        &self.info.description
    }

    fn spec(&self) -> ToolSpec {
        self.spec.clone()
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        let result = self.client.call_tool(&self.info.name, params).await?;

        // Image content has no text rendering; stand in with the mime type.
        let content = result
            .content
            .iter()
            .map(|block| match block {
                McpContentBlock::Text { text } => text.clone(),
                McpContentBlock::Image { mime_type, .. } => format!("[Image: {}]", mime_type),
            })
            .collect::<Vec<_>>()
            .join("\n");

        if result.is_error {
            Ok(ToolResult::error(content))
        } else {
            Ok(ToolResult::text(content))
        }
    }
}
