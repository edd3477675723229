// ABOUTME: Interactive medical research agent built on mediq.
// ABOUTME: Plans tools per query, synthesizes an answer, translates it.

use std::sync::Arc;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mediq::net;
use mediq::prelude::*;

const SYSTEM_PROMPT: &str = "You are a careful medical research assistant. \
Answer the user's question using the tool findings provided. Name the source \
of each claim and say clearly when the findings are insufficient. Remind the \
user that this is not a substitute for professional medical advice.";

// ============================================================================
// Startup
// ============================================================================

async fn connect_mcp(config: &AgentConfig) -> Result<Arc<McpClient>, MediqError> {
    let server = McpServerConfig {
        name: "medical".to_string(),
        url: config.mcp_server_url.clone(),
    };
    let mut client = McpClient::connect(server, config.proxy_url.as_deref()).await?;
    client.initialize().await?;
    Ok(Arc::new(client))
}

async fn build_registry(config: &AgentConfig, http: &reqwest::Client) -> Result<Registry> {
    let mut builder = Registry::builder()
        .register(WikipediaSearchTool::new(http.clone()))?
        .register(WebSearchTool::new(http.clone()))?
        .register(TranslateTool::new(http.clone(), config))?;

    if !config.mcp_server_url.is_empty() {
        match connect_mcp(config).await {
            Ok(mcp) => {
                builder = builder.merge_mcp(mcp, Some("mcp")).await?;
            }
            Err(e) => {
                warn!(error = %e, "MCP server unavailable, continuing with local tools");
            }
        }
    }

    Ok(builder.build())
}

// ============================================================================
// Query pipeline
// ============================================================================

async fn answer(
    llm: &OllamaClient,
    planner: &Planner,
    registry: &Registry,
    query: &str,
) -> Result<String> {
    let report = planner.execute(query).await;
    info!(run_id = %report.run_id, consulted = ?report.consulted, "plan complete");

    let request = ChatRequest::new(vec![
        Message::system(SYSTEM_PROMPT),
        Message::user(format!(
            "Question: {}\n\nTool findings:\n{}",
            query, report.combined
        )),
    ]);
    let response = llm.chat(&request).await?;

    let translated = registry
        .dispatch("translate", serde_json::json!({ "text": response.content }))
        .await;
    Ok(translated.content)
}

async fn run_agent_loop(
    config: &AgentConfig,
    http: &reqwest::Client,
    registry: &Registry,
) -> Result<()> {
    let llm = OllamaClient::with_base_url(&config.api_base, &config.model_id)
        .with_api_key(config.api_key.clone())
        .with_num_ctx(config.num_ctx)
        .with_http_client(http.clone());
    let planner = Planner::new(registry.clone());

    println!(
        "Medical research agent ready ({} tools registered).",
        registry.len()
    );
    println!("Type your question, or 'exit' to quit.");

    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query.to_lowercase().as_str(), "exit" | "quit" | "退出") {
            break;
        }
        let _ = editor.add_history_entry(query);

        match answer(&llm, &planner, registry, query).await {
            Ok(text) => println!("\n{}\n", text),
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }

    println!("Goodbye.");
    Ok(())
}

// ============================================================================
// Entry point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AgentConfig::from_env()?;
    let http = net::build_client(config.proxy_url.as_deref(), net::DEFAULT_TIMEOUT)?;
    let registry = build_registry(&config, &http).await?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("tools") => {
            let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
            print!("{}", registry.render_listing(verbose));
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Usage: med-agent [tools [--verbose]]");
            std::process::exit(2);
        }
        None => run_agent_loop(&config, &http, &registry).await,
    }
}
