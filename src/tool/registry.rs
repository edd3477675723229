// ABOUTME: Implements the tool registry - an immutable, startup-built
// ABOUTME: collection of tools with keyed lookup, dispatch, and listing.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{Tool, ToolResult};
use crate::error::{MediqError, ToolError};
use crate::llm::ToolDefinition;
use crate::mcp::{McpClient, McpProxyTool};

/// Builder assembling the registry at startup.
///
/// Registration is the only mutation point; once [`build`](Self::build) runs,
/// the tool set is fixed for the life of the process.
#[derive(Default)]
pub struct RegistryBuilder {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// Rejects duplicate names, names outside `[a-z0-9_]`, and specs whose
    /// required set references an undeclared parameter.
    pub fn register<T: Tool + 'static>(self, tool: T) -> Result<Self, ToolError> {
        self.register_arc(Arc::new(tool))
    }

    /// Register a tool from an Arc.
    pub fn register_arc(mut self, tool: Arc<dyn Tool>) -> Result<Self, ToolError> {
        let name = tool.name().to_string();
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_') {
            return Err(ToolError::InvalidName(name));
        }
        if self.index.contains_key(&name) {
            return Err(ToolError::DuplicateName(name));
        }
        if let Some(missing) = tool.spec().undeclared_required() {
            return Err(ToolError::InvalidSpec {
                reason: format!("required parameter '{}' is not declared", missing),
                tool: name,
            });
        }

        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(self)
    }

    /// Register proxies for every tool on an MCP server.
    pub async fn merge_mcp(
        self,
        client: Arc<McpClient>,
        prefix: Option<&str>,
    ) -> Result<Self, MediqError> {
        let infos = client.list_tools().await.map_err(MediqError::Mcp)?;

        let mut builder = self;
        for info in infos {
            let proxy = McpProxyTool::new(client.clone(), info, prefix);
            builder = builder.register(proxy).map_err(MediqError::Tool)?;
        }
        Ok(builder)
    }

    /// Finalize into an immutable registry.
    pub fn build(self) -> Registry {
        debug!(tools = self.tools.len(), "registry built");
        Registry {
            inner: Arc::new(Inner {
                tools: self.tools,
                index: self.index,
            }),
        }
    }
}

struct Inner {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

/// An immutable, registration-ordered collection of tools.
///
/// Cheap to clone and safe to share across tasks; there is no mutation after
/// construction, so no locking discipline is needed.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<Inner>,
}

impl Registry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.inner
            .index
            .get(name)
            .map(|&i| self.inner.tools[i].clone())
    }

    /// Iterate tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.inner.tools.iter()
    }

    /// Tool names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.inner
            .tools
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.inner.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.tools.is_empty()
    }

    /// Convert all tools to LLM tool definitions.
    pub fn to_definitions(&self) -> Vec<ToolDefinition> {
        self.inner
            .tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.spec().to_json_schema(),
            })
            .collect()
    }

    /// Invoke a tool by name.
    ///
    /// This is the never-raises boundary: unknown tools, failed validation,
    /// and handler errors all come back as error results with a printable
    /// message. Declared defaults are filled in before validation, so a call
    /// that omits an optional parameter sees its default value.
    pub async fn dispatch(&self, name: &str, mut args: serde_json::Value) -> ToolResult {
        let Some(tool) = self.get(name) else {
            return ToolResult::error(format!("Unknown tool: {}", name));
        };

        let spec = tool.spec();
        spec.apply_defaults(&mut args);
        if let Err(e) = spec.validate(&args) {
            return ToolResult::error(format!("{}: {}", name, e));
        }

        debug!(tool = name, "dispatching");
        match tool.execute(args).await {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = name, error = %e, "tool execution failed");
                ToolResult::error(format!("{} failed: {}", name, e))
            }
        }
    }

    /// Render the tool listing.
    ///
    /// Non-verbose: one `name - description` line per tool. Verbose: the
    /// parameter schema follows each tool, indented.
    pub fn render_listing(&self, verbose: bool) -> String {
        let mut out = String::new();
        for tool in self.iter() {
            let _ = writeln!(out, "{} - {}", tool.name(), tool.description());
            if verbose {
                let spec = tool.spec();
                for param in spec.params() {
                    let _ = write!(out, "    {} ({})", param.name, param.kind.as_str());
                    if spec.is_required(&param.name) {
                        out.push_str(" [required]");
                    }
                    if let Some(default) = &param.default {
                        let _ = write!(out, " [default: {}]", default);
                    }
                    if !param.description.is_empty() {
                        let _ = write!(out, " - {}", param.description);
                    }
                    out.push('\n');
                }
            }
        }
        out
    }
}
