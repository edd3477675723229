// ABOUTME: TranslateTool - ensures answers end up in Chinese.
// ABOUTME: CJK text passes through; failures fall back to the original text.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::AgentConfig;
use crate::net;
use crate::tool::{ParamKind, ParamSpec, Tool, ToolResult, ToolSpec};

const DASHSCOPE_ENDPOINT: &str =
    "https://dashscope.aliyuncs.com/api/v1/services/aigc/text-generation/generation";
const DASHSCOPE_MODEL: &str = "qwen-mt-turbo";

/// Tool translating non-Chinese content to Chinese.
pub struct TranslateTool {
    client: reqwest::Client,
    provider: String,
    api_key: String,
}

impl TranslateTool {
    /// Create the tool from the agent configuration.
    pub fn new(client: reqwest::Client, config: &AgentConfig) -> Self {
        Self {
            client,
            provider: config.translation_api.clone(),
            api_key: config.dashscope_api_key.clone(),
        }
    }

    async fn dashscope_translate(&self, text: &str) -> Result<String, anyhow::Error> {
        let body = serde_json::json!({
            "model": DASHSCOPE_MODEL,
            "input": {
                "messages": [{ "role": "user", "content": text }]
            },
            "parameters": {
                "translation_options": {
                    "source_lang": "auto",
                    "target_lang": "Chinese"
                }
            }
        });

        let request = self
            .client
            .post(DASHSCOPE_ENDPOINT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body);

        let response = net::send_with_retry(request).await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("translation API returned status {}", status);
        }

        let data: serde_json::Value = response.json().await?;
        data["output"]["text"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| anyhow::anyhow!("translation response missing output text"))
    }
}

/// True if the text contains CJK ideographs.
fn contains_cjk(text: &str) -> bool {
    text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c))
}

fn keep_original(text: &str, note: &str) -> ToolResult {
    ToolResult::text(format!("{}\n\n({})", text, note))
}

#[async_trait]
impl Tool for TranslateTool {
    fn name(&self) -> &str {
        "translate"
    }

    fn description(&self) -> &str {
        "Translate non-Chinese content to Chinese. Text that is already Chinese is returned unchanged."
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new()
            .param(ParamSpec::new(
                "text",
                ParamKind::String,
                "The text to translate",
            ))
            .required("text")
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            text: String,
        }
        let params: Params = serde_json::from_value(params)?;

        if contains_cjk(&params.text) {
            return Ok(ToolResult::text(params.text));
        }

        if self.provider != "dashscope" {
            return Ok(keep_original(
                &params.text,
                "no translation provider configured; original text kept",
            ));
        }
        if self.api_key.is_empty() {
            return Ok(keep_original(
                &params.text,
                "translation API key not set; original text kept",
            ));
        }

        info!(chars = params.text.len(), "translating");
        match self.dashscope_translate(&params.text).await {
            Ok(translated) => Ok(ToolResult::text(translated)),
            Err(e) => {
                warn!(error = %e, "translation failed");
                Ok(keep_original(
                    &params.text,
                    "translation failed; original text kept",
                ))
            }
        }
    }
}
