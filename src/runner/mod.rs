//! Quiz Runner - 答题状态机
//!
//! 状态流转：
//! - AwaitingAnswer --submit_answer--> ShowingFeedback
//! - ShowingFeedback --advance--> AwaitingAnswer（下一题）或 ShowingResults（最后一题，触发计分）
//! - 任意状态 --restart--> AwaitingAnswer@0
//!
//! Runner 只由一个持有者修改（`&mut self`），宿主通知 fire-and-forget。

pub mod follow_up;

use tracing::{debug, info, warn};

use crate::host::{HostChannel, HostEvent};
use crate::quiz::{check_question, score, Question, QuestionSet, QuizError, ScoreSummary};

/// 答题状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    AwaitingAnswer,
    ShowingFeedback,
    ShowingResults,
}

impl std::fmt::Display for QuizState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizState::AwaitingAnswer => write!(f, "awaiting_answer"),
            QuizState::ShowingFeedback => write!(f, "showing_feedback"),
            QuizState::ShowingResults => write!(f, "showing_results"),
        }
    }
}

/// 每次状态变化后交给展示层的快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerSnapshot {
    pub state: QuizState,
    pub current_index: usize,
}

/// 一轮答题
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    /// answers[i] 是第 i 题选中的选项，只追加
    pub answers: Vec<usize>,
    pub current_index: usize,
    pub state: QuizState,
    pub summary: Option<ScoreSummary>,
    pub review_requested: bool,
    pub more_requested: bool,
}

impl Attempt {
    fn new() -> Self {
        Self {
            answers: Vec::new(),
            current_index: 0,
            state: QuizState::AwaitingAnswer,
            summary: None,
            review_requested: false,
            more_requested: false,
        }
    }
}

/// Quiz Runner
pub struct QuizRunner {
    set: QuestionSet,
    attempt: Attempt,
    host: Box<dyn HostChannel>,
}

impl QuizRunner {
    /// 只接受非空题目集；没有题目时展示层应停留在 loading
    pub fn new(set: QuestionSet, host: Box<dyn HostChannel>) -> Result<Self, QuizError> {
        if set.is_empty() {
            return Err(QuizError::EmptyQuestionSet);
        }
        // QuestionSet 也可能直接反序列化得到，没经过校验器
        for (index, question) in set.questions.iter().enumerate() {
            check_question(question)
                .map_err(|reason| QuizError::MalformedQuestion { index, reason })?;
        }
        info!(
            topic = %set.topic,
            difficulty = %set.difficulty,
            questions = set.len(),
            "Quiz attempt started"
        );
        Ok(Self {
            set,
            attempt: Attempt::new(),
            host,
        })
    }

    pub fn question_set(&self) -> &QuestionSet {
        &self.set
    }

    pub fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    pub fn state(&self) -> QuizState {
        self.attempt.state
    }

    pub fn current_index(&self) -> usize {
        self.attempt.current_index
    }

    pub fn total_questions(&self) -> usize {
        self.set.len()
    }

    pub fn current_question(&self) -> &Question {
        &self.set.questions[self.attempt.current_index]
    }

    pub fn answers(&self) -> &[usize] {
        &self.attempt.answers
    }

    /// 当前题已选的选项
    pub fn selected_answer(&self) -> Option<usize> {
        self.attempt.answers.get(self.attempt.current_index).copied()
    }

    pub fn summary(&self) -> Option<&ScoreSummary> {
        self.attempt.summary.as_ref()
    }

    pub fn snapshot(&self) -> RunnerSnapshot {
        RunnerSnapshot {
            state: self.attempt.state,
            current_index: self.attempt.current_index,
        }
    }

    pub fn is_last_question(&self) -> bool {
        self.attempt.current_index == self.set.len() - 1
    }

    /// 第 i 题是否答对；未作答返回 None
    pub fn is_correct(&self, i: usize) -> Option<bool> {
        let selected = *self.attempt.answers.get(i)?;
        Some(self.set.questions[i].is_correct(selected))
    }

    pub fn correct_count(&self) -> usize {
        (0..self.attempt.answers.len())
            .filter(|&i| self.is_correct(i) == Some(true))
            .count()
    }

    pub fn mistakes_count(&self) -> usize {
        self.attempt.answers.len() - self.correct_count()
    }

    /// 进度条比例：反馈页把当前题算作已完成
    pub fn progress(&self) -> f64 {
        let done = match self.attempt.state {
            QuizState::AwaitingAnswer => self.attempt.current_index,
            QuizState::ShowingFeedback => self.attempt.current_index + 1,
            QuizState::ShowingResults => self.set.len(),
        };
        done as f64 / self.set.len() as f64
    }

    /// 提交答案
    ///
    /// 反馈页重复提交被忽略，返回 `Ok(None)`。
    pub fn submit_answer(&mut self, index: usize) -> Result<Option<RunnerSnapshot>, QuizError> {
        match self.attempt.state {
            QuizState::AwaitingAnswer => {}
            QuizState::ShowingFeedback => {
                debug!(index, "Answer already submitted, ignoring");
                return Ok(None);
            }
            QuizState::ShowingResults => {
                return Err(QuizError::IllegalTransition {
                    action: "submit an answer",
                    state: self.attempt.state,
                })
            }
        }

        let option_count = self.current_question().options.len();
        if index >= option_count {
            return Err(QuizError::InvalidAnswerIndex {
                index,
                option_count,
            });
        }

        self.attempt.answers.push(index);
        self.attempt.state = QuizState::ShowingFeedback;
        debug!(
            question = self.attempt.current_index,
            answer = index,
            correct = self.current_question().is_correct(index),
            "Answer recorded"
        );
        self.broadcast_answers();

        Ok(Some(self.snapshot()))
    }

    /// 下一题；最后一题进入结果页并计分
    pub fn advance(&mut self) -> Result<RunnerSnapshot, QuizError> {
        if self.attempt.state != QuizState::ShowingFeedback {
            return Err(QuizError::IllegalTransition {
                action: "advance",
                state: self.attempt.state,
            });
        }

        if self.is_last_question() {
            let summary = score(self.correct_count() as u32, self.set.len() as u32)?;
            info!(
                correct = summary.correct_count,
                total = summary.total_count,
                success_rate = summary.success_rate,
                "Quiz finished"
            );
            self.attempt.summary = Some(summary);
            self.attempt.state = QuizState::ShowingResults;
        } else {
            self.attempt.current_index += 1;
            self.attempt.state = QuizState::AwaitingAnswer;
        }
        self.broadcast_answers();

        Ok(self.snapshot())
    }

    /// 重新开始，丢弃本轮所有记录
    pub fn restart(&mut self) -> RunnerSnapshot {
        debug!(from = %self.attempt.state, "Quiz restarted");
        self.attempt = Attempt::new();
        self.snapshot()
    }

    /// 请宿主逐题点评（每轮一次）
    pub fn request_review(&mut self) -> Result<(), QuizError> {
        self.ensure_results("request a review")?;
        if self.attempt.review_requested {
            return Err(QuizError::FollowUpAlreadySent { kind: "review" });
        }
        self.attempt.review_requested = true;
        let prompt = follow_up::review_prompt(&self.set, &self.attempt.answers);
        self.send(HostEvent::FollowUp { prompt });
        Ok(())
    }

    /// 请宿主再出一套题（每轮一次）
    pub fn request_more_questions(&mut self) -> Result<(), QuizError> {
        self.ensure_results("request more questions")?;
        if self.attempt.more_requested {
            return Err(QuizError::FollowUpAlreadySent {
                kind: "more questions",
            });
        }
        self.attempt.more_requested = true;
        self.send(HostEvent::FollowUp {
            prompt: follow_up::MORE_QUESTIONS_PROMPT.to_string(),
        });
        Ok(())
    }

    fn ensure_results(&self, action: &'static str) -> Result<(), QuizError> {
        if self.attempt.state != QuizState::ShowingResults {
            return Err(QuizError::IllegalTransition {
                action,
                state: self.attempt.state,
            });
        }
        Ok(())
    }

    fn broadcast_answers(&self) {
        self.send(HostEvent::WidgetState {
            user_answers: self.attempt.answers.clone(),
        });
    }

    fn send(&self, event: HostEvent) {
        if let Err(e) = self.host.notify(&event) {
            warn!(
                channel = self.host.name(),
                kind = event.kind(),
                error = %e,
                "Host notification failed"
            );
        }
    }
}
