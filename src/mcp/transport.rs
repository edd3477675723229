// ABOUTME: Streamable HTTP transport for MCP - POSTs JSON-RPC bodies and
// ABOUTME: tracks the Mcp-Session-Id header across calls.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{McpNotification, McpRequest, McpResponse};
use crate::error::McpError;
use crate::net;

/// Trait for MCP transport implementations.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and receive a response.
    async fn send(&self, request: McpRequest) -> Result<McpResponse, McpError>;

    /// Send a notification (no response expected).
    async fn notify(&self, notification: McpNotification) -> Result<(), McpError>;

    /// Shutdown the transport.
    async fn shutdown(&self) -> Result<(), McpError>;
}

/// MCP streamable HTTP transport.
///
/// Stateless request/response; a server may establish a session via the
/// `Mcp-Session-Id` response header, which is echoed on subsequent calls.
pub struct HttpTransport {
    endpoint_url: String,
    http_client: reqwest::Client,
    session_id: Mutex<Option<String>>,
}

impl HttpTransport {
    /// Connect to an HTTP MCP server, optionally through a proxy.
    pub async fn connect(url: &str, proxy_url: Option<&str>) -> Result<Self, McpError> {
        let _parsed = reqwest::Url::parse(url)
            .map_err(|e| McpError::Connection(format!("Invalid URL: {}", e)))?;

        let http_client = net::build_client(proxy_url, net::DEFAULT_TIMEOUT)
            .map_err(|e| McpError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint_url: url.to_string(),
            http_client,
            session_id: Mutex::new(None),
        })
    }

    /// The endpoint URL.
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    async fn post(&self, body: String) -> Result<reqwest::Response, McpError> {
        let mut builder = self
            .http_client
            .post(&self.endpoint_url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        if let Some(session_id) = self.session_id.lock().await.as_ref() {
            builder = builder.header("Mcp-Session-Id", session_id.clone());
        }

        let response = net::send_with_retry(builder.body(body))
            .await
            .map_err(|e| McpError::Connection(format!("HTTP request failed: {}", e)))?;

        if let Some(session_id) = response.headers().get("Mcp-Session-Id") {
            if let Ok(id) = session_id.to_str() {
                *self.session_id.lock().await = Some(id.to_string());
            }
        }

        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: McpRequest) -> Result<McpResponse, McpError> {
        let request_id = request.id;
        let response = self.post(serde_json::to_string(&request)?).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(McpError::Protocol(format!(
                "HTTP {} - {}",
                status.as_u16(),
                body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| McpError::Protocol(format!("Failed to read response: {}", e)))?;

        let mcp_response: McpResponse = serde_json::from_str(&body)
            .map_err(|e| McpError::Protocol(format!("Invalid JSON-RPC response: {}", e)))?;

        if mcp_response.id != request_id {
            return Err(McpError::Protocol(format!(
                "Response ID {} does not match request ID {}",
                mcp_response.id, request_id
            )));
        }

        Ok(mcp_response)
    }

    async fn notify(&self, notification: McpNotification) -> Result<(), McpError> {
        let response = self.post(serde_json::to_string(&notification)?).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(McpError::Protocol(format!(
                "HTTP {} on notify - {}",
                status.as_u16(),
                body
            )));
        }

        Ok(())
    }

    async fn shutdown(&self) -> Result<(), McpError> {
        // Stateless transport; just forget the session.
        *self.session_id.lock().await = None;
        Ok(())
    }
}
