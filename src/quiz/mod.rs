//! Quiz 核心：数据模型、题目校验、成绩计算

pub mod error;
pub mod scoring;
pub mod types;
pub mod validator;

pub use error::QuizError;
pub use scoring::{encouragement_for, score};
pub use types::{Difficulty, OptionPolicy, Question, QuestionSet, ScoreSummary};
pub use validator::{check_question, validate_question, validate_questions, RejectReason, Rejection, Validation};
