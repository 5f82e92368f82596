//! Question validator - filters untrusted candidate questions
//!
//! Input comes straight from the model, so every record is checked
//! independently. A bad record is dropped and reported; it never fails the
//! batch.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::types::{OptionPolicy, Question};

/// Why a candidate question was dropped
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    NotAnObject,
    MissingQuestion,
    EmptyQuestion,
    OptionsNotArray,
    OptionNotString { position: usize },
    OptionCount { count: usize, policy: OptionPolicy },
    CorrectIndexNotInteger,
    CorrectIndexOutOfRange { correct_index: i64, option_count: usize },
    ExplanationNotString,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::NotAnObject => write!(f, "record is not an object"),
            RejectReason::MissingQuestion => write!(f, "`question` is missing or not a string"),
            RejectReason::EmptyQuestion => write!(f, "`question` is empty"),
            RejectReason::OptionsNotArray => write!(f, "`options` is missing or not an array"),
            RejectReason::OptionNotString { position } => {
                write!(f, "option {} is not a string", position)
            }
            RejectReason::OptionCount { count, policy } => {
                write!(f, "{} options given, {} required", count, policy)
            }
            RejectReason::CorrectIndexNotInteger => {
                write!(f, "`correctIndex` is missing or not an integer")
            }
            RejectReason::CorrectIndexOutOfRange {
                correct_index,
                option_count,
            } => write!(
                f,
                "`correctIndex` {} outside [0, {})",
                correct_index, option_count
            ),
            RejectReason::ExplanationNotString => write!(f, "`explanation` is not a string"),
        }
    }
}

/// A dropped record and its position in the input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub index: usize,
    pub reason: RejectReason,
}

/// Result of validating a batch
#[derive(Debug, Clone, Default)]
pub struct Validation {
    pub questions: Vec<Question>,
    pub rejections: Vec<Rejection>,
}

impl Validation {
    pub fn is_clean(&self) -> bool {
        self.rejections.is_empty()
    }
}

/// Validate a batch of candidate questions, keeping input order.
pub fn validate_questions(candidates: &[Value], policy: OptionPolicy) -> Validation {
    let mut validation = Validation::default();

    for (index, candidate) in candidates.iter().enumerate() {
        match validate_question(candidate, policy) {
            Ok(question) => validation.questions.push(question),
            Err(reason) => {
                warn!(index, reason = %reason, record = %candidate, "Invalid question dropped");
                validation.rejections.push(Rejection { index, reason });
            }
        }
    }

    validation
}

/// Validate a single candidate record.
pub fn validate_question(candidate: &Value, policy: OptionPolicy) -> Result<Question, RejectReason> {
    let record = candidate.as_object().ok_or(RejectReason::NotAnObject)?;

    let question = record
        .get("question")
        .and_then(|v| v.as_str())
        .ok_or(RejectReason::MissingQuestion)?;
    if question.is_empty() {
        return Err(RejectReason::EmptyQuestion);
    }

    let raw_options = record
        .get("options")
        .and_then(|v| v.as_array())
        .ok_or(RejectReason::OptionsNotArray)?;
    let options = raw_options
        .iter()
        .enumerate()
        .map(|(position, v)| {
            v.as_str()
                .map(str::to_string)
                .ok_or(RejectReason::OptionNotString { position })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if !policy.allows(options.len()) {
        return Err(RejectReason::OptionCount {
            count: options.len(),
            policy,
        });
    }

    let correct_index = record
        .get("correctIndex")
        .and_then(as_integer)
        .ok_or(RejectReason::CorrectIndexNotInteger)?;
    if correct_index < 0 || correct_index as usize >= options.len() {
        return Err(RejectReason::CorrectIndexOutOfRange {
            correct_index,
            option_count: options.len(),
        });
    }

    let explanation = match record.get("explanation") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(RejectReason::ExplanationNotString),
    };

    Ok(Question {
        question: question.to_string(),
        options,
        correct_index: correct_index as usize,
        explanation,
    })
}

/// Re-check an already typed question (e.g. deserialized from a file).
pub fn check_question(question: &Question) -> Result<(), RejectReason> {
    if question.question.is_empty() {
        return Err(RejectReason::EmptyQuestion);
    }
    if question.correct_index >= question.options.len() {
        return Err(RejectReason::CorrectIndexOutOfRange {
            correct_index: question.correct_index as i64,
            option_count: question.options.len(),
        });
    }
    Ok(())
}

/// JSON 数字且没有小数部分（2.0 也算整数）
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_whitespace_question_is_not_empty() {
        let mut record = four_options(json!(1));
        record["question"] = json!("   ");
        assert!(validate_question(&record, OptionPolicy::default()).is_ok());

        record["question"] = json!("");
        assert_eq!(
            validate_question(&record, OptionPolicy::default()),
            Err(RejectReason::EmptyQuestion)
        );
    }

    #[test]
    fn test_check_question_rejects_out_of_range_index() {
        let mut question =
            validate_question(&four_options(json!(3)), OptionPolicy::default()).unwrap();
        assert_eq!(check_question(&question), Ok(()));

        question.correct_index = 7;
        assert_eq!(
            check_question(&question),
            Err(RejectReason::CorrectIndexOutOfRange {
                correct_index: 7,
                option_count: 4
            })
        );

        question.options.clear();
        question.correct_index = 0;
        assert!(check_question(&question).is_err());
    }

    fn four_options(correct_index: Value) -> Value {
        json!({
            "question": "Which planet is largest?",
            "options": ["Mars", "Jupiter", "Venus", "Earth"],
            "correctIndex": correct_index,
            "explanation": "Jupiter is the largest planet."
        })
    }

    #[test]
    fn test_valid_question_accepted() {
        let q = validate_question(&four_options(json!(1)), OptionPolicy::Exact(4)).unwrap();
        assert_eq!(q.correct_index, 1);
        assert_eq!(q.options.len(), 4);
        assert_eq!(q.explanation.as_deref(), Some("Jupiter is the largest planet."));
    }

    #[test]
    fn test_correct_index_boundary() {
        // len-1 通过，len 拒绝
        assert!(validate_question(&four_options(json!(3)), OptionPolicy::Exact(4)).is_ok());
        assert_eq!(
            validate_question(&four_options(json!(4)), OptionPolicy::Exact(4)),
            Err(RejectReason::CorrectIndexOutOfRange {
                correct_index: 4,
                option_count: 4
            })
        );
        assert!(matches!(
            validate_question(&four_options(json!(-1)), OptionPolicy::Exact(4)),
            Err(RejectReason::CorrectIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_correct_index_must_be_integer() {
        assert!(validate_question(&four_options(json!(2.0)), OptionPolicy::Exact(4)).is_ok());
        assert_eq!(
            validate_question(&four_options(json!(1.5)), OptionPolicy::Exact(4)),
            Err(RejectReason::CorrectIndexNotInteger)
        );
        assert_eq!(
            validate_question(&four_options(json!("1")), OptionPolicy::Exact(4)),
            Err(RejectReason::CorrectIndexNotInteger)
        );
    }

    #[test]
    fn test_option_policy_applied() {
        let two = json!({
            "question": "True or false?",
            "options": ["True", "False"],
            "correctIndex": 0
        });
        assert!(matches!(
            validate_question(&two, OptionPolicy::Exact(4)),
            Err(RejectReason::OptionCount { count: 2, .. })
        ));
        assert!(validate_question(&two, OptionPolicy::AtLeast(2)).is_ok());
    }

    #[test]
    fn test_structural_rejections() {
        let policy = OptionPolicy::AtLeast(2);
        assert_eq!(validate_question(&json!("nope"), policy), Err(RejectReason::NotAnObject));
        assert_eq!(
            validate_question(&json!({"question": "", "options": ["a", "b"], "correctIndex": 0}), policy),
            Err(RejectReason::EmptyQuestion)
        );
        assert_eq!(
            validate_question(&json!({"question": "q", "options": "a,b", "correctIndex": 0}), policy),
            Err(RejectReason::OptionsNotArray)
        );
        assert_eq!(
            validate_question(&json!({"question": "q", "options": ["a", 2], "correctIndex": 0}), policy),
            Err(RejectReason::OptionNotString { position: 1 })
        );
        assert_eq!(
            validate_question(
                &json!({"question": "q", "options": ["a", "b"], "correctIndex": 0, "explanation": 7}),
                policy
            ),
            Err(RejectReason::ExplanationNotString)
        );
    }

    #[test]
    fn test_batch_keeps_order_and_reports_rejections() {
        let candidates = vec![
            four_options(json!(0)),
            json!(null),
            four_options(json!(9)),
            four_options(json!(2)),
        ];
        let validation = validate_questions(&candidates, OptionPolicy::Exact(4));

        assert_eq!(validation.questions.len(), 2);
        assert_eq!(validation.questions[0].correct_index, 0);
        assert_eq!(validation.questions[1].correct_index, 2);

        let rejected: Vec<usize> = validation.rejections.iter().map(|r| r.index).collect();
        assert_eq!(rejected, vec![1, 2]);
        assert!(!validation.is_clean());
    }

    #[test]
    fn test_output_never_longer_than_input() {
        let candidates = vec![
            json!({}),
            json!([1, 2]),
            four_options(json!(1)),
            json!({"question": "q", "options": ["a", "b", "c", "d"], "correctIndex": 3}),
            json!({"question": "q", "options": ["a", "b", "c"], "correctIndex": 0}),
        ];
        for policy in [OptionPolicy::Exact(4), OptionPolicy::AtLeast(2)] {
            let validation = validate_questions(&candidates, policy);
            assert!(validation.questions.len() <= candidates.len());
            assert_eq!(
                validation.questions.len() + validation.rejections.len(),
                candidates.len()
            );
            for q in &validation.questions {
                assert!(!q.question.is_empty());
                assert!(policy.allows(q.options.len()));
                assert!(q.correct_index < q.options.len());
            }
        }
    }
}
