// ABOUTME: LLM module - chat types and the Ollama client used to synthesize
// ABOUTME: final answers from tool output.

mod ollama;
mod types;

pub use ollama::*;
pub use types::*;

#[cfg(test)]
mod types_test;
