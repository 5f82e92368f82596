//! Quiz 错误类型

use super::validator::RejectReason;
use crate::runner::QuizState;

/// Quiz 核心错误
///
/// 全部可恢复：调用方记录日志或返回给 host，进程继续运行。
#[derive(Debug, Clone, PartialEq)]
pub enum QuizError {
    /// 候选题目结构不合法（校验器只记录，不会因此中止整批）
    MalformedQuestion { index: usize, reason: RejectReason },
    /// 选项下标越界
    InvalidAnswerIndex { index: usize, option_count: usize },
    /// 当前状态不允许该操作
    IllegalTransition {
        action: &'static str,
        state: QuizState,
    },
    /// 题目总数为 0，无法计算正确率
    DivisionByZeroQuestions,
    /// 正确数大于题目总数
    CorrectExceedsTotal { correct: u32, total: u32 },
    /// 题目集为空（校验后没有剩余题目）
    EmptyQuestionSet,
    /// 同一轮中 follow-up 已发送过
    FollowUpAlreadySent { kind: &'static str },
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::MalformedQuestion { index, reason } => {
                write!(f, "malformed question at index {}: {}", index, reason)
            }
            QuizError::InvalidAnswerIndex { index, option_count } => write!(
                f,
                "answer index {} out of range (question has {} options)",
                index, option_count
            ),
            QuizError::IllegalTransition { action, state } => {
                write!(f, "cannot {} while {}", action, state)
            }
            QuizError::DivisionByZeroQuestions => {
                write!(f, "cannot score a quiz with zero questions")
            }
            QuizError::CorrectExceedsTotal { correct, total } => write!(
                f,
                "correct answers count {} exceeds total questions count {}",
                correct, total
            ),
            QuizError::EmptyQuestionSet => write!(f, "question set contains no valid questions"),
            QuizError::FollowUpAlreadySent { kind } => {
                write!(f, "{} follow-up already sent for this attempt", kind)
            }
        }
    }
}

impl std::error::Error for QuizError {}
