//! 从文件读取题目
//!
//! 文件可以是 render-quiz 的参数，也可以是它返回的 structuredContent
//! （或整条 tools/call 响应）。都会经过同一个校验器。

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::config::Config;
use crate::mcp::tools::quiz::build_question_set;
use crate::quiz::{QuestionSet, Validation};

/// 取出真正的题目参数
fn quiz_arguments(document: &Value) -> &Value {
    if let Some(content) = document.pointer("/result/structuredContent") {
        return content;
    }
    document.get("structuredContent").unwrap_or(document)
}

/// 解析 JSON 文本
pub fn parse_quiz_document(config: &Config, text: &str) -> Result<(QuestionSet, Validation)> {
    let document: Value = serde_json::from_str(text).context("Quiz file is not valid JSON")?;
    build_question_set(config, quiz_arguments(&document))
}

/// 读取题目文件
pub fn load_quiz_file(config: &Config, path: &Path) -> Result<(QuestionSet, Validation)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read quiz file {}", path.display()))?;
    parse_quiz_document(config, &text)
        .with_context(|| format!("Invalid quiz file {}", path.display()))
}
