//! MCP tool handlers
//!
//! - render-quiz: validate questions and render the widget
//! - score-quiz-results: compute encouragement and success rate

pub mod quiz;
pub mod score;

use anyhow::Result;
use serde_json::Value;

use crate::config::Config;
use crate::mcp::types::{InvalidParams, McpTool};

pub use quiz::{handle_render_quiz, RENDER_QUIZ};
pub use score::{handle_score_quiz_results, SCORE_QUIZ_RESULTS};

/// All tool descriptors
pub fn definitions(config: &Config) -> Vec<McpTool> {
    vec![quiz::definition(config), score::definition()]
}

/// Dispatch a tools/call by name
pub fn call(config: &Config, name: &str, args: &Value) -> Result<Value> {
    match name {
        RENDER_QUIZ => handle_render_quiz(config, args),
        SCORE_QUIZ_RESULTS => handle_score_quiz_results(args),
        _ => Err(InvalidParams(format!("Unknown tool: {}", name)).into()),
    }
}
