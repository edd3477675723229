// ABOUTME: Tests for LLM chat types - message constructors and serde shapes.

use super::*;

#[test]
fn test_message_constructors() {
    let system = Message::system("be helpful");
    assert_eq!(system.role, Role::System);
    assert_eq!(system.content, "be helpful");

    let user = Message::user("question");
    assert_eq!(user.role, Role::User);

    let assistant = Message::assistant("answer");
    assert_eq!(assistant.role, Role::Assistant);
}

#[test]
fn test_role_serialization() {
    assert_eq!(serde_json::to_value(Role::System).unwrap(), "system");
    assert_eq!(serde_json::to_value(Role::User).unwrap(), "user");
    assert_eq!(serde_json::to_value(Role::Assistant).unwrap(), "assistant");
}

#[test]
fn test_message_roundtrip() {
    let message = Message::user("what is hypertension?");
    let json = serde_json::to_string(&message).unwrap();
    let back: Message = serde_json::from_str(&json).unwrap();
    assert_eq!(back.role, Role::User);
    assert_eq!(back.content, "what is hypertension?");
}

#[test]
fn test_chat_request_builders() {
    let request = ChatRequest::new(vec![Message::user("q")])
        .with_model("qwen3:8b")
        .with_tools(vec![ToolDefinition {
            name: "translate".into(),
            description: "Translate text".into(),
            input_schema: serde_json::json!({"type": "object"}),
        }]);

    assert_eq!(request.model, "qwen3:8b");
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.tools.len(), 1);
}

#[test]
fn test_usage_default() {
    let usage = Usage::default();
    assert_eq!(usage.input_tokens, 0);
    assert_eq!(usage.output_tokens, 0);
}
