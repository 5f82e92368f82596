//! Quizaurus - 对话宿主中的交互式测验 widget
//!
//! - `quiz`: 题目模型、校验和计分
//! - `runner`: 单次答题的状态机
//! - `mcp`: 暴露 render-quiz / score-quiz-results 工具和 widget 资源的 MCP server
//! - `host`: 向宿主广播 widget state 和 follow-up 消息
//! - `tui`: 终端里的答题界面

pub mod cli;
pub mod config;
pub mod host;
#[path = "mcp_mod/mod.rs"]
pub mod mcp;
pub mod quiz;
pub mod runner;
pub mod tui;

pub use config::Config;
pub use host::{
    channels_from_config, HostChannel, HostEvent, HostEventRecord, LocalFileChannel,
    MultiChannel, WebhookChannel, WebhookConfig,
};
pub use mcp::McpServer;
pub use quiz::{
    encouragement_for, score, validate_question, validate_questions, Difficulty, OptionPolicy,
    Question, QuestionSet, QuizError, RejectReason, Rejection, ScoreSummary, Validation,
};
pub use runner::{QuizRunner, QuizState, RunnerSnapshot};
