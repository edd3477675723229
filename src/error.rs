// ABOUTME: Defines all error types for the mediq library using thiserror.
// ABOUTME: Each submodule has its own error enum, unified under MediqError.

/// Top-level error type for the mediq library.
#[derive(Debug, thiserror::Error)]
pub enum MediqError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("MCP error: {0}")]
    Mcp(#[from] McpError),
}

/// Errors from tool registration and parameter validation.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Duplicate tool name: {0}")]
    DuplicateName(String),

    #[error("Invalid tool name: '{0}' (expected lowercase letters, digits, underscores)")]
    InvalidName(String),

    #[error("Invalid parameter schema for '{tool}': {reason}")]
    InvalidSpec { tool: String, reason: String },

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

/// Errors from LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Errors from MCP operations.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("RPC error ({code}): {message}")]
    Rpc { code: i32, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: String, value: String },
}
