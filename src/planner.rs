// ABOUTME: Keyword-driven planner - selects which tools answer a query and
// ABOUTME: runs them in priority order until a result is adequate.

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::tool::{Registry, ToolResult};

const CALCULATION_TERMS: [&str; 7] = [
    "calculate",
    "calculation",
    "compute",
    "dose",
    "dosage",
    "计算",
    "分析",
];

const REFERENCE_TERMS: [&str; 5] = ["guideline", "definition", "what is", "指南", "定义"];

/// Sentinels that mark a result as a miss even though it is not an error.
const MISS_MARKERS: [&str; 4] = ["no results", "no wikipedia results", "not available", "未找到"];

/// Outcome of one planning run.
#[derive(Debug, Clone)]
pub struct PlanReport {
    pub run_id: Uuid,
    /// Tools consulted, in order.
    pub consulted: Vec<String>,
    /// Labeled tool outputs combined into one block of evidence.
    pub combined: String,
}

/// Decides which tools answer a query and in what order.
pub struct Planner {
    registry: Registry,
    priority: Vec<String>,
}

impl Planner {
    /// Create a planner over a registry.
    ///
    /// Default priority: MCP-proxied tools in registration order, then
    /// Wikipedia, then general web search.
    pub fn new(registry: Registry) -> Self {
        let mut priority: Vec<String> = registry
            .names()
            .into_iter()
            .filter(|name| name.starts_with("mcp_"))
            .collect();
        for name in ["wikipedia_search", "web_search"] {
            if registry.get(name).is_some() {
                priority.push(name.to_string());
            }
        }
        Self { registry, priority }
    }

    /// Override the priority order.
    pub fn with_priority(mut self, priority: Vec<String>) -> Self {
        self.priority = priority;
        self
    }

    /// Choose the tools for a query based on keyword heuristics.
    pub fn select(&self, query: &str) -> Vec<String> {
        let lower = query.to_lowercase();

        if CALCULATION_TERMS.iter().any(|term| lower.contains(term)) {
            let mcp: Vec<String> = self
                .priority
                .iter()
                .filter(|name| name.starts_with("mcp_"))
                .cloned()
                .collect();
            if !mcp.is_empty() {
                return mcp;
            }
        }

        if REFERENCE_TERMS.iter().any(|term| lower.contains(term))
            && self.registry.get("wikipedia_search").is_some()
        {
            return vec!["wikipedia_search".to_string()];
        }

        self.priority.clone()
    }

    /// Run the selected tools sequentially, stopping early once a result is
    /// adequate, and combine the outputs labeled by tool name.
    pub async fn execute(&self, query: &str) -> PlanReport {
        let run_id = Uuid::new_v4();
        self.run(query, run_id)
            .instrument(info_span!("plan", %run_id))
            .await
    }

    async fn run(&self, query: &str, run_id: Uuid) -> PlanReport {
        let mut consulted = Vec::new();
        let mut sections = Vec::new();

        for name in self.select(query) {
            info!(tool = %name, "consulting");
            let result = self
                .registry
                .dispatch(&name, serde_json::json!({ "query": query }))
                .await;
            consulted.push(name.clone());

            if result.is_error {
                warn!(tool = %name, message = %result.content, "tool returned an error result");
                continue;
            }

            let adequate = is_adequate(&result);
            sections.push(format!("[{}]\n{}", name, result.content.trim()));
            if adequate {
                break;
            }
        }

        let combined = if sections.is_empty() {
            "No relevant information found.".to_string()
        } else {
            sections.join("\n\n")
        };

        PlanReport {
            run_id,
            consulted,
            combined,
        }
    }
}

fn is_adequate(result: &ToolResult) -> bool {
    if !result.has_content() {
        return false;
    }
    let lower = result.content.to_lowercase();
    !MISS_MARKERS.iter().any(|marker| lower.contains(marker))
}
