//! 成绩计算 - 纯函数，无状态

use super::error::QuizError;
use super::types::ScoreSummary;

/// 鼓励语档位，自上而下匹配第一个
const ENCOURAGEMENT_TIERS: &[(f64, &str)] = &[
    (0.9, "Excellent!"),
    (0.7, "Good job!"),
    (0.5, "Not bad!"),
];
const FALLBACK_ENCOURAGEMENT: &str = "Keep practicing!";

/// 根据正确率选择鼓励语
pub fn encouragement_for(success_rate: f64) -> &'static str {
    ENCOURAGEMENT_TIERS
        .iter()
        .find(|(threshold, _)| success_rate >= *threshold)
        .map(|(_, text)| *text)
        .unwrap_or(FALLBACK_ENCOURAGEMENT)
}

/// 计算成绩
///
/// `total_count == 0` 直接报错，不返回 NaN/Infinity。
pub fn score(correct_count: u32, total_count: u32) -> Result<ScoreSummary, QuizError> {
    if total_count == 0 {
        return Err(QuizError::DivisionByZeroQuestions);
    }
    if correct_count > total_count {
        return Err(QuizError::CorrectExceedsTotal {
            correct: correct_count,
            total: total_count,
        });
    }

    let success_rate = f64::from(correct_count) / f64::from(total_count);

    Ok(ScoreSummary {
        correct_count,
        total_count,
        success_rate,
        encouragement: encouragement_for(success_rate).to_string(),
    })
}
