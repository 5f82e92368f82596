//! Follow-up prompts sent to the host after a finished attempt

use serde::Serialize;

use crate::quiz::QuestionSet;

pub const MORE_QUESTIONS_PROMPT: &str =
    "Generate another quiz with new questions on the same topic.";

const REVIEW_INSTRUCTIONS: &str = "\
The user has completed a quiz. Below is a JSON array with one entry per question: \
the question itself, the correct answer and the user's answer.
Give the user feedback for each question. \
If the user's answer matches the correct answer, keep it short. \
If it does not, explain briefly and add something that helps understand and remember the answer.
Do not mention answer indices, tool output or widget state in the response.";

/// 单题复盘条目
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    pub question: String,
    pub correct_option: String,
    pub selected_option: Option<String>,
}

/// 按题目顺序生成复盘条目，未作答的题 selected_option 为 None
pub fn review_entries(set: &QuestionSet, answers: &[usize]) -> Vec<ReviewEntry> {
    set.questions
        .iter()
        .enumerate()
        .map(|(i, q)| ReviewEntry {
            question: q.question.clone(),
            correct_option: q.correct_option().to_string(),
            selected_option: answers
                .get(i)
                .and_then(|&selected| q.options.get(selected))
                .cloned(),
        })
        .collect()
}

/// 复盘 prompt：说明 + JSON
pub fn review_prompt(set: &QuestionSet, answers: &[usize]) -> String {
    let entries = review_entries(set, answers);
    let json = serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string());
    format!("{}\n\n{}", REVIEW_INSTRUCTIONS, json)
}
