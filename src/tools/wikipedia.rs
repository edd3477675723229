// ABOUTME: WikipediaSearchTool - looks up authoritative medical information.
// ABOUTME: Two-phase: search for pages, then fetch each intro extract.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use super::strip_tags;
use crate::config::language_code;
use crate::net;
use crate::tool::{ParamKind, ParamSpec, Tool, ToolResult, ToolSpec};

/// Tool for searching Wikipedia.
pub struct WikipediaSearchTool {
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<PageHit>,
}

#[derive(Deserialize)]
struct PageHit {
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    pageid: Option<u64>,
}

impl WikipediaSearchTool {
    /// Create the tool around a shared HTTP client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch the plain-text intro extract of a page. Failures are logged and
    /// reported as `None`; the caller falls back to the search snippet.
    async fn page_extract(&self, page_id: u64, language: &str) -> Option<String> {
        let url = format!("https://{}.wikipedia.org/w/api.php", language);
        let page_id = page_id.to_string();
        let request = self.client.get(&url).query(&[
            ("action", "query"),
            ("prop", "extracts"),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("pageids", page_id.as_str()),
            ("format", "json"),
            ("redirects", "1"),
        ]);

        let response = match net::send_with_retry(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(page_id = %page_id, error = %e, "extract fetch failed");
                return None;
            }
        };

        let data: serde_json::Value = match response.json().await {
            Ok(data) => data,
            Err(e) => {
                warn!(page_id = %page_id, error = %e, "extract decode failed");
                return None;
            }
        };

        data["query"]["pages"][&page_id]["extract"]
            .as_str()
            .map(str::trim)
            .filter(|extract| !extract.is_empty())
            .map(String::from)
    }

    fn format_results(query: &str, language: &str, entries: &[(String, String)]) -> String {
        let mut sections: Vec<String> = entries
            .iter()
            .enumerate()
            .map(|(i, (title, body))| format!("{}. {}\n{}", i + 1, title, body))
            .collect();

        let search_url = format!(
            "https://{}.wikipedia.org/w/index.php?search={}",
            language,
            urlencoding::encode(query)
        );
        sections.push(format!("Full results: {}", search_url));

        sections.join("\n\n")
    }
}

#[async_trait]
impl Tool for WikipediaSearchTool {
    fn name(&self) -> &str {
        "wikipedia_search"
    }

    fn description(&self) -> &str {
        "Search Wikipedia for authoritative medical information. Use for detailed descriptions of diseases, drugs, and medical procedures."
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
                    "language",
                    ParamKind::String,
                    "Wikipedia language code or name (e.g. 'en', 'Chinese')",
                )
                .with_default("en"),
            )
            .param(
                ParamSpec::new(
                    "max_results",
                    ParamKind::Integer,
                    "Maximum number of results to return",
                )
                .with_default(3),
            )
            .required("query")
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            query: String,
            #[serde(default = "default_language")]
            language: String,
            #[serde(default = "default_max_results")]
            max_results: usize,
        }

        fn default_language() -> String {
            "en".to_string()
        }

        fn default_max_results() -> usize {
            3
        }

        let params: Params = serde_json::from_value(params)?;
        let language = language_code(&params.language)
            .map(String::from)
            .unwrap_or(params.language);

        info!(query = %params.query, %language, "wikipedia search");

        let url = format!("https://{}.wikipedia.org/w/api.php", language);
        let limit = params.max_results.to_string();
        let request = self.client.get(&url).query(&[
            ("action", "query"),
            ("list", "search"),
            ("srsearch", params.query.as_str()),
            ("format", "json"),
            ("srlimit", limit.as_str()),
            ("srprop", "snippet"),
        ]);

        let response = match net::send_with_retry(request).await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Ok(ToolResult::error(
                    "Wikipedia search timed out, try again later.",
                ));
            }
            Err(e) => {
                return Ok(ToolResult::error(format!(
                    "Wikipedia request failed: {}",
                    e
                )));
            }
        };

        if !response.status().is_success() {
            return Ok(ToolResult::error(format!(
                "Wikipedia request failed with status: {}",
                response.status()
            )));
        }

        let search: SearchResponse = match response.json().await {
            Ok(search) => search,
            Err(e) => {
                return Ok(ToolResult::error(format!(
                    "Failed to decode Wikipedia response: {}",
                    e
                )));
            }
        };

        let hits = search.query.map(|q| q.search).unwrap_or_default();
        if hits.is_empty() {
            return Ok(ToolResult::text("No Wikipedia results found."));
        }

        let mut entries = Vec::new();
        for hit in hits.into_iter().take(params.max_results) {
            let body = match hit.pageid {
                Some(page_id) => self
                    .page_extract(page_id, &language)
                    .await
                    .unwrap_or_else(|| strip_tags(&hit.snippet)),
                None => strip_tags(&hit.snippet),
            };
            entries.push((hit.title, body));
        }

        let count = entries.len();
        let output = Self::format_results(&params.query, &language, &entries);
        Ok(ToolResult::text(output).with_metadata("results", count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_shape() {
        let tool = WikipediaSearchTool::new(reqwest::Client::new());
        let spec = tool.spec();
        assert!(spec.is_required("query"));
        assert!(!spec.is_required("language"));
        let max = spec
            .params()
            .iter()
            .find(|p| p.name == "max_results")
            .unwrap();
        assert_eq!(max.default, Some(serde_json::json!(3)));
    }

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "query": {
                "search": [
                    {"title": "Diabetes", "snippet": "<span>chronic</span> condition", "pageid": 123},
                    {"title": "Insulin", "snippet": "", "pageid": 456}
                ]
            }
        }"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        let hits = parsed.query.unwrap().search;
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Diabetes");
        assert_eq!(hits[0].pageid, Some(123));
    }

    #[test]
    fn test_parse_empty_search_response() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"query": {"search": []}}"#).unwrap();
        assert!(parsed.query.unwrap().search.is_empty());
    }

    #[test]
    fn test_format_results() {
        let entries = vec![
            ("Diabetes".to_string(), "A chronic condition.".to_string()),
            ("Insulin".to_string(), "A hormone.".to_string()),
        ];
        let output = WikipediaSearchTool::format_results("diabetes care", "en", &entries);

        assert!(output.contains("1. Diabetes\nA chronic condition."));
        assert!(output.contains("2. Insulin"));
        assert!(output.contains("https://en.wikipedia.org/w/index.php?search=diabetes%20care"));
    }
}
