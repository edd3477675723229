// ABOUTME: Defines the Tool trait - the core abstraction for agent capabilities.
// ABOUTME: Tools have a name, description, parameter spec, and async execute method.

use async_trait::async_trait;

use super::{ToolResult, ToolSpec};

/// A tool that can be executed by an agent.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name of this tool (lowercase, underscores).
    fn name(&self) -> &str;

    /// Returns a human-readable description for listings and the LLM.
    fn description(&self) -> &str;

    /// Returns the declarative schema for the tool's parameters.
    fn spec(&self) -> ToolSpec;

    /// Execute the tool with the given parameters.
    ///
    /// Errors returned here are converted to error results at the dispatch
    /// boundary; callers of [`super::Registry::dispatch`] never see an `Err`.
    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error>;
}
