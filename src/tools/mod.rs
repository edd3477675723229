// ABOUTME: Built-in tools for the medical agent - Wikipedia lookup, web
// ABOUTME: search, and translation to Chinese.

mod translation;
mod web_search;
mod wikipedia;

pub use translation::TranslateTool;
pub use web_search::{SearchHit, WebSearchTool};
pub use wikipedia::WikipediaSearchTool;

/// Strip HTML tags and unescape the common entities found in search
/// snippets.
pub(crate) fn strip_tags(html: &str) -> String {
    let mut text = String::new();
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
}
