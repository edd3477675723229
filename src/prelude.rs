// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use mediq::prelude::*;` to get started quickly.

pub use crate::config::AgentConfig;
pub use crate::error::{ConfigError, LlmError, McpError, MediqError, ToolError};
pub use crate::llm::{
    ChatRequest, ChatResponse, Message, OllamaClient, Role, ToolDefinition, Usage,
};
pub use crate::mcp::{
    McpClient, McpContentBlock, McpProxyTool, McpServerConfig, McpToolInfo, McpToolResult,
};
pub use crate::planner::{PlanReport, Planner};
pub use crate::tool::{
    ParamKind, ParamSpec, Registry, RegistryBuilder, Tool, ToolResult, ToolSpec,
};
pub use crate::tools::{SearchHit, TranslateTool, WebSearchTool, WikipediaSearchTool};
