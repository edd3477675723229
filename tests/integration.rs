// ABOUTME: Integration tests verifying modules work together.
// ABOUTME: Exercises the registry, planner, and listing without any network.

use mediq::prelude::*;

/// A stand-in reference tool with one required and one defaulted parameter.
struct LookupTool;

#[async_trait::async_trait]
impl Tool for LookupTool {
    fn name(&self) -> &str {
        "wikipedia_search"
    }

    fn description(&self) -> &str {
        "Look up a medical topic"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new()
            .param(ParamSpec::new(
                "query",
                ParamKind::String,
                "The search query",
            ))
            .param(
                ParamSpec::new("max_results", ParamKind::Integer, "Result cap").with_default(3),
            )
            .required("query")
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        let query = params["query"].as_str().unwrap_or_default();
        let max_results = params["max_results"].as_i64().unwrap_or_default();
        Ok(ToolResult::text(format!(
            "Found {} entries for {}.",
            max_results, query
        )))
    }
}

/// A tool that never finds anything.
struct EmptyTool;

#[async_trait::async_trait]
impl Tool for EmptyTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the wider web"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new()
            .param(ParamSpec::new(
                "query",
                ParamKind::String,
                "The search query",
            ))
            .required("query")
    }

    async fn execute(&self, _params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        Ok(ToolResult::text("No results found."))
    }
}

fn build_registry() -> Registry {
    Registry::builder()
        .register(LookupTool)
        .expect("register lookup")
        .register(EmptyTool)
        .expect("register web")
        .build()
}

#[tokio::test]
async fn test_dispatch_fills_defaults_and_returns_text() {
    let registry = build_registry();
    let result = registry
        .dispatch("wikipedia_search", serde_json::json!({"query": "sepsis"}))
        .await;

    assert!(!result.is_error);
    assert_eq!(result.content, "Found 3 entries for sepsis.");
}

#[tokio::test]
async fn test_dispatch_missing_required_never_raises() {
    let registry = build_registry();
    let result = registry
        .dispatch("wikipedia_search", serde_json::json!({}))
        .await;

    assert!(result.is_error);
    assert!(result.content.contains("query"));
}

#[test]
fn test_listing_verbosity() {
    let registry = build_registry();

    let brief = registry.render_listing(false);
    assert!(brief.contains("wikipedia_search - Look up a medical topic"));
    assert!(brief.contains("web_search - Search the wider web"));
    assert!(!brief.contains("max_results"));
    assert!(!brief.contains("[required]"));

    let verbose = registry.render_listing(true);
    assert!(verbose.contains("query (string) [required]"));
    assert!(verbose.contains("max_results (integer) [default: 3]"));
}

#[test]
fn test_definitions_for_llm() {
    let registry = build_registry();
    let definitions = registry.to_definitions();

    assert_eq!(definitions.len(), 2);
    assert_eq!(definitions[0].name, "wikipedia_search");
    assert_eq!(
        definitions[0].input_schema["properties"]["query"]["type"],
        "string"
    );
    assert_eq!(
        definitions[0].input_schema["required"],
        serde_json::json!(["query"])
    );
}

#[tokio::test]
async fn test_planner_over_registry() {
    let registry = build_registry();
    let planner = Planner::new(registry);

    let report = planner.execute("tell me about sepsis").await;

    // The reference tool answers adequately, so the web tool is never
    // consulted.
    assert_eq!(report.consulted, vec!["wikipedia_search"]);
    assert!(report.combined.contains("[wikipedia_search]"));
    assert!(report.combined.contains("sepsis"));
}

#[test]
fn test_duplicate_registration_is_an_error() {
    let result = Registry::builder()
        .register(LookupTool)
        .expect("first registration")
        .register(LookupTool);

    assert!(matches!(result, Err(ToolError::DuplicateName(_))));
}
