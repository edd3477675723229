// ABOUTME: Agent configuration loaded from the environment, with defaults
// ABOUTME: matching a local Ollama setup. Binary loads .env before this runs.

use std::env;

use crate::error::ConfigError;

/// Configuration for the agent and its tools.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Model to run the agent on (`MODEL_ID`).
    pub model_id: String,

    /// Base URL of the chat API (`API_BASE`).
    pub api_base: String,

    /// API key; Ollama ignores it but requires a non-empty value (`API_KEY`).
    pub api_key: String,

    /// Context window size passed to the model (`NUM_CTX`).
    pub num_ctx: u32,

    /// MCP server endpoint; empty disables MCP (`MCP_SERVER_URL`).
    pub mcp_server_url: String,

    /// Outbound proxy for all HTTP traffic; `None` means direct
    /// (`PROXY_URL`).
    pub proxy_url: Option<String>,

    /// Translation provider name (`TRANSLATION_API`).
    pub translation_api: String,

    /// API key for the DashScope translation provider
    /// (`DASHSCOPE_API_KEY`).
    pub dashscope_api_key: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model_id: "qwen3:8b".into(),
            api_base: "http://localhost:11434".into(),
            api_key: "ollama".into(),
            num_ctx: 8192,
            mcp_server_url: String::new(),
            proxy_url: None,
            translation_api: "dashscope".into(),
            dashscope_api_key: String::new(),
        }
    }
}

impl AgentConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = env_nonempty("MODEL_ID") {
            config.model_id = value;
        }
        if let Some(value) = env_nonempty("API_BASE") {
            config.api_base = value;
        }
        if let Some(value) = env_nonempty("API_KEY") {
            config.api_key = value;
        }
        if let Some(value) = env_nonempty("NUM_CTX") {
            config.num_ctx = value.parse().map_err(|_| ConfigError::InvalidValue {
                var: "NUM_CTX".into(),
                value,
            })?;
        }
        if let Some(value) = env_nonempty("MCP_SERVER_URL") {
            config.mcp_server_url = value;
        }
        config.proxy_url = env_nonempty("PROXY_URL");
        if let Some(value) = env_nonempty("TRANSLATION_API") {
            config.translation_api = value;
        }
        if let Some(value) = env_nonempty("DASHSCOPE_API_KEY") {
            config.dashscope_api_key = value;
        }

        Ok(config)
    }
}

fn env_nonempty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// Map a language name to its Wikipedia/translation code.
///
/// Accepts codes as-is, so "en" and "English" both resolve to "en".
pub fn language_code(name: &str) -> Option<&'static str> {
    const LANGUAGES: [(&str, &str); 7] = [
        ("chinese", "zh"),
        ("english", "en"),
        ("japanese", "ja"),
        ("korean", "ko"),
        ("thai", "th"),
        ("french", "fr"),
        ("german", "de"),
    ];

    let lower = name.trim().to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|(full, code)| *full == lower || *code == lower)
        .map(|(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.model_id, "qwen3:8b");
        assert_eq!(config.api_base, "http://localhost:11434");
        assert_eq!(config.num_ctx, 8192);
        assert!(config.mcp_server_url.is_empty());
        assert!(config.proxy_url.is_none());
    }

    #[test]
    fn test_language_code() {
        assert_eq!(language_code("Chinese"), Some("zh"));
        assert_eq!(language_code("english"), Some("en"));
        assert_eq!(language_code("zh"), Some("zh"));
        assert_eq!(language_code(" German "), Some("de"));
        assert_eq!(language_code("klingon"), None);
    }
}
