//! score-quiz-results tool handler

use anyhow::Result;
use serde_json::Value;
use tracing::info;

use crate::mcp::types::{InvalidParams, McpTool};
use crate::quiz::score;

pub const SCORE_QUIZ_RESULTS: &str = "score-quiz-results";

/// Tool descriptor for tools/list
pub fn definition() -> McpTool {
    McpTool {
        name: SCORE_QUIZ_RESULTS.to_string(),
        title: Some("Prepare quiz results".to_string()),
        description: "Given raw quiz results, calculate stats to present to the user.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "correctAnswersCount": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "correct answers count"
                },
                "totalQuestionsCount": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "total questions count"
                }
            },
            "required": ["correctAnswersCount", "totalQuestionsCount"]
        }),
        meta: None,
    }
}

/// 读取非负整数参数（3.0 也接受）
fn count_arg(args: &Value, key: &str) -> Result<u32> {
    let value = args
        .get(key)
        .ok_or_else(|| InvalidParams(format!("missing {}", key)))?;

    let count = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    });

    count
        .and_then(|c| u32::try_from(c).ok())
        .ok_or_else(|| InvalidParams(format!("{} must be a non-negative integer", key)).into())
}

/// Handle a score-quiz-results call
pub fn handle_score_quiz_results(args: &Value) -> Result<Value> {
    let correct = count_arg(args, "correctAnswersCount")?;
    let total = count_arg(args, "totalQuestionsCount")?;

    let summary = score(correct, total)?;
    info!(
        correct,
        total,
        success_rate = summary.success_rate,
        "Quiz results scored"
    );

    Ok(serde_json::json!({
        "content": [],
        "structuredContent": {
            "encouragement": summary.encouragement,
            "successRate": summary.success_rate
        }
    }))
}
