// ABOUTME: Ollama chat client speaking the native /api/chat endpoint so the
// ABOUTME: configured context window (num_ctx) is honored.

use serde::{Deserialize, Serialize};

use super::{ChatRequest, ChatResponse, Message, ToolDefinition, Usage};
use crate::error::LlmError;

/// Default base URL for a local Ollama server.
pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Default model when none is configured.
pub const OLLAMA_DEFAULT_MODEL: &str = "qwen3:8b";

/// Client for the Ollama chat API.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    http: reqwest::Client,
    default_model: String,
    api_key: String,
    num_ctx: Option<u32>,
}

impl OllamaClient {
    /// Create a client for a local Ollama server.
    pub fn new(model: &str) -> Self {
        Self::with_base_url(OLLAMA_BASE_URL, model)
    }

    /// Create a client with a custom base URL.
    ///
    /// `base_url` is the server root (e.g. `http://remote:11434`); the
    /// `/api/chat` path is appended per request.
    pub fn with_base_url(base_url: &str, model: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            default_model: if model.is_empty() {
                OLLAMA_DEFAULT_MODEL.to_string()
            } else {
                model.to_string()
            },
            api_key: "ollama".to_string(),
            num_ctx: None,
        }
    }

    /// Use a pre-built HTTP client (proxy, timeout).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Set the bearer key sent with each request. Ollama ignores the value
    /// but some gateways reject requests without one.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Set the model context window.
    pub fn with_num_ctx(mut self, num_ctx: u32) -> Self {
        self.num_ctx = Some(num_ctx);
        self
    }

    /// Send a chat request and return the completed response.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let model = if request.model.is_empty() {
            self.default_model.clone()
        } else {
            request.model.clone()
        };

        let body = WireRequest {
            model: &model,
            messages: &request.messages,
            stream: false,
            tools: wire_tools(&request.tools),
            options: self.num_ctx.map(|num_ctx| WireOptions { num_ctx }),
        };

        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<WireError>().await {
                Ok(err) => err.error,
                Err(_) => format!("chat request failed with status {}", status),
            };
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let wire: WireResponse = response.json().await?;
        Ok(ChatResponse {
            model: wire.model,
            content: wire.message.content,
            usage: Usage {
                input_tokens: wire.prompt_eval_count.unwrap_or_default(),
                output_tokens: wire.eval_count.unwrap_or_default(),
            },
        })
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(OLLAMA_DEFAULT_MODEL)
    }
}

fn wire_tools(tools: &[ToolDefinition]) -> Option<Vec<WireTool<'_>>> {
    if tools.is_empty() {
        return None;
    }
    Some(
        tools
            .iter()
            .map(|t| WireTool {
                kind: "function",
                function: WireFunction {
                    name: &t.name,
                    description: &t.description,
                    parameters: &t.input_schema,
                },
            })
            .collect(),
    )
}

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<WireOptions>,
}

#[derive(Serialize)]
struct WireOptions {
    num_ctx: u32,
}

#[derive(Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction<'a>,
}

#[derive(Serialize)]
struct WireFunction<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

#[derive(Deserialize)]
struct WireResponse {
    model: String,
    message: WireMessage,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Deserialize)]
struct WireMessage {
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct WireError {
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new() {
        let client = OllamaClient::new("llama3.2");
        assert_eq!(client.base_url, OLLAMA_BASE_URL);
        assert_eq!(client.default_model, "llama3.2");
    }

    #[test]
    fn test_client_new_empty_model() {
        let client = OllamaClient::new("");
        assert_eq!(client.default_model, OLLAMA_DEFAULT_MODEL);
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let client = OllamaClient::with_base_url("http://remote:11434/", "mistral");
        assert_eq!(client.base_url, "http://remote:11434");
        assert_eq!(client.default_model, "mistral");
    }

    #[test]
    fn test_with_num_ctx() {
        let client = OllamaClient::new("llama3.2").with_num_ctx(8192);
        assert_eq!(client.num_ctx, Some(8192));
    }

    #[test]
    fn test_wire_request_shape() {
        let messages = [Message::user("hi")];
        let request = WireRequest {
            model: "m",
            messages: &messages,
            stream: false,
            tools: None,
            options: Some(WireOptions { num_ctx: 4096 }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_ctx"], 4096);
        assert_eq!(json["messages"][0]["role"], "user");
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_wire_tools_shape() {
        let tools = vec![ToolDefinition {
            name: "wikipedia_search".into(),
            description: "Search Wikipedia".into(),
            input_schema: serde_json::json!({"type": "object"}),
        }];
        let wire = wire_tools(&tools).unwrap();
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json[0]["type"], "function");
        assert_eq!(json[0]["function"]["name"], "wikipedia_search");
        assert_eq!(json[0]["function"]["parameters"]["type"], "object");
    }
}
