// ABOUTME: WebSearchTool - performs DuckDuckGo HTML searches for recent
// ABOUTME: information not covered by Wikipedia.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::strip_tags;
use crate::net;
use crate::tool::{ParamKind, ParamSpec, Tool, ToolResult, ToolSpec};

const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// A single search result.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Tool for performing web searches.
pub struct WebSearchTool {
    client: reqwest::Client,
}

impl WebSearchTool {
    /// Create the tool around a shared HTTP client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Extract results from the DuckDuckGo HTML page.
    ///
    /// Result anchors and snippets appear interleaved per result block, so
    /// pairing them by index is sufficient for this page shape.
    fn parse_results(html: &str, limit: usize) -> Result<Vec<SearchHit>, regex::Error> {
        let anchor_re =
            regex::Regex::new(r#"(?s)class="result__a"[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#)?;
        let snippet_re = regex::Regex::new(r#"(?s)class="result__snippet"[^>]*>(.*?)</a>"#)?;

        let snippets: Vec<String> = snippet_re
            .captures_iter(html)
            .map(|c| strip_tags(&c[1]).trim().to_string())
            .collect();

        let mut hits = Vec::new();
        for (i, captures) in anchor_re.captures_iter(html).enumerate() {
            if hits.len() >= limit {
                break;
            }

            let url = unwrap_redirect(&captures[1]);
            let title = strip_tags(&captures[2]).trim().to_string();
            if url.is_empty() || title.is_empty() {
                continue;
            }

            hits.push(SearchHit {
                title,
                url,
                snippet: snippets.get(i).cloned().unwrap_or_default(),
            });
        }

        Ok(hits)
    }
}

/// DuckDuckGo wraps result URLs in a redirect carrying the real target in
/// the `uddg` query parameter.
fn unwrap_redirect(raw: &str) -> String {
    let Some(position) = raw.find("uddg=") else {
        return raw.to_string();
    };
    let encoded = &raw[position + 5..];
    let encoded = encoded.split('&').next().unwrap_or(encoded);
    urlencoding::decode(encoded)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for information. Returns a list of search results with titles, URLs, and snippets."
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new()
            .param(ParamSpec::new(
                "query",
                ParamKind::String,
                "The search query",
            ))
            .param(
                ParamSpec::new(
                    "max_results",
                    ParamKind::Integer,
                    "Maximum number of results to return",
                )
                .with_default(5),
            )
            .required("query")
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            query: String,
            #[serde(default = "default_max_results")]
            max_results: usize,
        }

        fn default_max_results() -> usize {
            5
        }

        let params: Params = serde_json::from_value(params)?;
        info!(query = %params.query, "web search");

        let url = format!("{}?q={}", SEARCH_ENDPOINT, urlencoding::encode(&params.query));
        let response = match net::send_with_retry(self.client.get(&url)).await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Ok(ToolResult::error("Web search timed out, try again later."));
            }
            Err(e) => return Ok(ToolResult::error(format!("Web search failed: {}", e))),
        };

        if !response.status().is_success() {
            return Ok(ToolResult::error(format!(
                "Web search failed with status: {}",
                response.status()
            )));
        }

        let html = match response.text().await {
            Ok(html) => html,
            Err(e) => {
                return Ok(ToolResult::error(format!(
                    "Failed to read search response: {}",
                    e
                )));
            }
        };

        let hits = match Self::parse_results(&html, params.max_results) {
            Ok(hits) => hits,
            Err(e) => return Ok(ToolResult::error(format!("Result parsing failed: {}", e))),
        };

        if hits.is_empty() {
            return Ok(ToolResult::text("No results found."));
        }

        let mut output = format!(
            "Found {} results for \"{}\":\n\n",
            hits.len(),
            params.query
        );
        for (i, hit) in hits.iter().enumerate() {
            output.push_str(&format!(
                "{}. {}\n   {}\n   {}\n\n",
                i + 1,
                hit.title,
                hit.url,
                if hit.snippet.is_empty() {
                    "(no snippet)"
                } else {
                    &hit.snippet
                }
            ));
        }

        let count = hits.len();
        Ok(ToolResult::text(output).with_metadata("results", count))
    }
}
