// ABOUTME: MCP module - Model Context Protocol client over streamable HTTP.
// ABOUTME: Proxies server-side tools into the registry.

mod client;
mod proxy;
mod transport;
mod types;

pub use client::McpClient;
pub use proxy::McpProxyTool;
pub use transport::{HttpTransport, Transport};
pub use types::*;
