// ABOUTME: Tests for the registry - registration invariants, dispatch
// ABOUTME: boundary, defaults, and listing verbosity.

use super::*;

/// A tool with one required and one defaulted parameter.
struct CustomTool;

#[async_trait::async_trait]
impl Tool for CustomTool {
    fn name(&self) -> &str {
        "custom_tool_name"
    }

    fn description(&self) -> &str {
        "Formats its parameters back to the caller"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new()
            .param(ParamSpec::new(
                "param1",
                ParamKind::String,
                "The input text",
            ))
            .param(
                ParamSpec::new("param2", ParamKind::Integer, "A tuning knob").with_default(10),
            )
            .required("param1")
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        let param1 = params["param1"].as_str().unwrap_or_default();
        let param2 = params["param2"].as_i64().unwrap_or_default();
        Ok(ToolResult::text(format!(
            "param1={} param2={}",
            param1, param2
        )))
    }
}

/// A tool whose handler always fails.
struct FailingTool;

#[async_trait::async_trait]
impl Tool for FailingTool {
    fn name(&self) -> &str {
        "failing"
    }

    fn description(&self) -> &str {
        "Always fails"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new()
    }

    async fn execute(&self, _params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        Err(anyhow::anyhow!("boom"))
    }
}

/// A tool with a required name missing from the declared parameters.
struct BrokenSpecTool;

#[async_trait::async_trait]
impl Tool for BrokenSpecTool {
    fn name(&self) -> &str {
        "broken"
    }

    fn description(&self) -> &str {
        "Requires an undeclared parameter"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new()
            .param(ParamSpec::new("declared", ParamKind::String, ""))
            .required("undeclared")
    }

    async fn execute(&self, _params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        Ok(ToolResult::default())
    }
}

struct NamedTool(&'static str);

#[async_trait::async_trait]
impl Tool for NamedTool {
    fn name(&self) -> &str {
        self.0
    }

    fn description(&self) -> &str {
        "A named stub"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new()
    }

    async fn execute(&self, _params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        Ok(ToolResult::text(self.0))
    }
}

fn build_registry() -> Registry {
    Registry::builder()
        .register(CustomTool)
        .unwrap()
        .register(FailingTool)
        .unwrap()
        .build()
}

#[tokio::test]
async fn test_register_and_get() {
    let registry = build_registry();
    let tool = registry.get("custom_tool_name");
    assert!(tool.is_some());
    assert_eq!(tool.unwrap().name(), "custom_tool_name");
    assert!(registry.get("nonexistent").is_none());
}

#[test]
fn test_duplicate_name_rejected() {
    let result = Registry::builder()
        .register(CustomTool)
        .unwrap()
        .register(CustomTool);
    assert!(matches!(
        result,
        Err(crate::error::ToolError::DuplicateName(name)) if name == "custom_tool_name"
    ));
}

#[test]
fn test_malformed_name_rejected() {
    let result = Registry::builder().register(NamedTool("Bad Name"));
    assert!(matches!(
        result,
        Err(crate::error::ToolError::InvalidName(_))
    ));

    let result = Registry::builder().register(NamedTool(""));
    assert!(matches!(
        result,
        Err(crate::error::ToolError::InvalidName(_))
    ));
}

#[test]
fn test_undeclared_required_rejected() {
    let result = Registry::builder().register(BrokenSpecTool);
    assert!(matches!(
        result,
        Err(crate::error::ToolError::InvalidSpec { .. })
    ));
}

#[test]
fn test_registration_order_preserved() {
    let registry = Registry::builder()
        .register(NamedTool("zeta"))
        .unwrap()
        .register(NamedTool("alpha"))
        .unwrap()
        .build();
    assert_eq!(registry.names(), vec!["zeta", "alpha"]);
}

#[tokio::test]
async fn test_dispatch_applies_default() {
    let registry = build_registry();
    let result = registry
        .dispatch("custom_tool_name", serde_json::json!({"param1": "test"}))
        .await;

    assert!(!result.is_error);
    assert!(result.content.contains("test"));
    assert!(result.content.contains("10"));
}

#[tokio::test]
async fn test_dispatch_explicit_value_wins_over_default() {
    let registry = build_registry();
    let result = registry
        .dispatch(
            "custom_tool_name",
            serde_json::json!({"param1": "test", "param2": 3}),
        )
        .await;

    assert!(result.content.contains("param2=3"));
}

#[tokio::test]
async fn test_dispatch_missing_required_is_error_string() {
    let registry = build_registry();
    let result = registry
        .dispatch("custom_tool_name", serde_json::json!({}))
        .await;

    assert!(result.is_error);
    assert!(result.content.contains("param1"));
}

#[tokio::test]
async fn test_dispatch_wrong_type_is_error_string() {
    let registry = build_registry();
    let result = registry
        .dispatch(
            "custom_tool_name",
            serde_json::json!({"param1": "test", "param2": "not a number"}),
        )
        .await;

    assert!(result.is_error);
    assert!(result.content.contains("param2"));
}

#[tokio::test]
async fn test_dispatch_unknown_tool_is_error_string() {
    let registry = build_registry();
    let result = registry.dispatch("missing", serde_json::json!({})).await;

    assert!(result.is_error);
    assert!(result.content.contains("Unknown tool"));
}

#[tokio::test]
async fn test_dispatch_handler_error_is_error_string() {
    let registry = build_registry();
    let result = registry.dispatch("failing", serde_json::json!({})).await;

    assert!(result.is_error);
    assert!(result.content.contains("boom"));
}

#[tokio::test]
async fn test_dispatch_null_args() {
    let registry = build_registry();
    let result = registry
        .dispatch("failing", serde_json::Value::Null)
        .await;

    // Null is normalized to an empty object before validation.
    assert!(result.content.contains("boom"));
}

#[test]
fn test_listing_not_verbose_has_no_schema() {
    let registry = build_registry();
    let listing = registry.render_listing(false);

    assert!(listing.contains("custom_tool_name - Formats its parameters back to the caller"));
    assert!(listing.contains("failing - Always fails"));
    assert!(!listing.contains("param1"));
    assert!(!listing.contains("[required]"));
    assert!(!listing.contains("[default"));
}

#[test]
fn test_listing_verbose_has_schema() {
    let registry = build_registry();
    let listing = registry.render_listing(true);

    assert!(listing.contains("param1 (string) [required]"));
    assert!(listing.contains("param2 (integer)"));
    assert!(listing.contains("[default: 10]"));
}

#[test]
fn test_to_definitions() {
    let registry = build_registry();
    let defs = registry.to_definitions();

    assert_eq!(defs.len(), 2);
    assert_eq!(defs[0].name, "custom_tool_name");
    assert_eq!(
        defs[0].description,
        "Formats its parameters back to the caller"
    );
    assert_eq!(defs[0].input_schema["required"][0], "param1");
}

#[test]
fn test_clone_shares_tools() {
    let registry = build_registry();
    let clone = registry.clone();
    assert_eq!(clone.len(), registry.len());
    assert_eq!(clone.names(), registry.names());
}
