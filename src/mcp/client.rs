// ABOUTME: MCP client - initialize handshake, tool listing, and tool calls
// ABOUTME: against a streamable HTTP server.

use std::sync::Arc;

use super::transport::{HttpTransport, Transport};
use super::{
    McpInitializeResult, McpNotification, McpRequest, McpServerCapabilities, McpServerConfig,
    McpToolInfo, McpToolResult,
};
use crate::error::McpError;

/// MCP protocol revision spoken by this client.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Client for communicating with an MCP server.
pub struct McpClient {
    config: McpServerConfig,
    transport: Arc<dyn Transport>,
    capabilities: McpServerCapabilities,
}

impl McpClient {
    /// Connect to an MCP server, optionally through a proxy.
    pub async fn connect(
        config: McpServerConfig,
        proxy_url: Option<&str>,
    ) -> Result<Self, McpError> {
        let transport = Arc::new(HttpTransport::connect(&config.url, proxy_url).await?);
        Ok(Self {
            config,
            transport,
            capabilities: McpServerCapabilities::default(),
        })
    }

    /// The server name from the configuration.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Server capabilities (available after initialize).
    pub fn capabilities(&self) -> &McpServerCapabilities {
        &self.capabilities
    }

    async fn request(
        &self,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, McpError> {
        let request = McpRequest::new(method, params);
        let response = self.transport.send(request).await?;

        if let Some(error) = response.error {
            return Err(McpError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response
            .result
            .ok_or_else(|| McpError::Protocol("No result in response".into()))
    }

    async fn notify(&self, method: &str, params: Option<serde_json::Value>) -> Result<(), McpError> {
        self.transport
            .notify(McpNotification::new(method, params))
            .await
    }

    /// Initialize the MCP connection.
    pub async fn initialize(&mut self) -> Result<McpInitializeResult, McpError> {
        let params = serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {
                "name": "mediq",
                "version": env!("CARGO_PKG_VERSION")
            }
        });

        let result = self.request("initialize", Some(params)).await?;
        let init_result: McpInitializeResult = serde_json::from_value(result)?;

        self.capabilities = init_result.capabilities.clone();
        self.notify("notifications/initialized", None).await?;

        Ok(init_result)
    }

    /// List available tools from the server.
    pub async fn list_tools(&self) -> Result<Vec<McpToolInfo>, McpError> {
        let result = self.request("tools/list", None).await?;
        let tools: Vec<McpToolInfo> = serde_json::from_value(result["tools"].clone())?;
        Ok(tools)
    }

    /// Call a tool on the server.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<McpToolResult, McpError> {
        let params = serde_json::json!({
            "name": name,
            "arguments": arguments
        });

        let result = self.request("tools/call", Some(params)).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Ping the server to check if it's alive.
    pub async fn ping(&self) -> Result<(), McpError> {
        self.request("ping", None).await?;
        Ok(())
    }

    /// Shutdown the server connection gracefully.
    pub async fn shutdown(&self) -> Result<(), McpError> {
        self.transport.shutdown().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_invalid_url() {
        let config = McpServerConfig {
            name: "test".into(),
            url: "not a url".into(),
        };
        let result = McpClient::connect(config, None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_connect_valid_url() {
        let config = McpServerConfig {
            name: "medical".into(),
            url: "https://example.com/mcp".into(),
        };
        let client = McpClient::connect(config, None).await.unwrap();
        assert_eq!(client.name(), "medical");
        assert!(client.capabilities().tools.is_none());
    }
}
