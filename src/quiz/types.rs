//! Quiz 数据模型

use serde::{Deserialize, Serialize};

/// 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("unknown difficulty: {} (expected easy, medium or hard)", s)),
        }
    }
}

/// 单选题
///
/// 只能由校验器构造出来再交给下游，`correct_index` 一定落在 `options` 范围内。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// 题干
    pub question: String,
    /// 选项，下标即答案编号
    pub options: Vec<String>,
    /// 正确选项下标
    pub correct_index: usize,
    /// 解析（反馈页显示）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    pub fn correct_option(&self) -> &str {
        self.options
            .get(self.correct_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_index
    }
}

/// 已校验的题目集，即 `render-quiz` 的 structuredContent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub topic: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub questions: Vec<Question>,
}

impl QuestionSet {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 工具调用结果下方的旁白
    pub fn narration(&self) -> String {
        format!("Starting a {} quiz on {}.", self.difficulty, self.topic)
    }
}

/// 每题选项数量约束
///
/// 各部署只能选一种：精确 N 个或至少 N 个。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionPolicy {
    Exact(usize),
    AtLeast(usize),
}

impl Default for OptionPolicy {
    fn default() -> Self {
        OptionPolicy::Exact(4)
    }
}

impl OptionPolicy {
    pub fn allows(&self, count: usize) -> bool {
        match *self {
            OptionPolicy::Exact(n) => count == n,
            OptionPolicy::AtLeast(n) => count >= n,
        }
    }

    /// 供 tools/list 的 inputSchema 使用
    pub fn schema_bounds(&self) -> serde_json::Value {
        match *self {
            OptionPolicy::Exact(n) => serde_json::json!({ "minItems": n, "maxItems": n }),
            OptionPolicy::AtLeast(n) => serde_json::json!({ "minItems": n }),
        }
    }
}

impl std::fmt::Display for OptionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionPolicy::Exact(n) => write!(f, "exactly {}", n),
            OptionPolicy::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// 成绩汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub correct_count: u32,
    pub total_count: u32,
    pub success_rate: f64,
    pub encouragement: String,
}

impl ScoreSummary {
    /// 百分比文本，如 "70%"
    pub fn percent(&self) -> String {
        format!("{:.0}%", self.success_rate * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_serializes_camel_case() {
        let q = Question {
            question: "2 + 2?".to_string(),
            options: vec!["3".into(), "4".into()],
            correct_index: 1,
            explanation: None,
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["correctIndex"], 1);
        assert!(json.get("explanation").is_none());
        assert_eq!(q.correct_option(), "4");
    }

    #[test]
    fn test_correct_option_out_of_range_is_empty() {
        let q = Question {
            question: "?".to_string(),
            options: vec!["a".into()],
            correct_index: 5,
            explanation: None,
        };
        assert_eq!(q.correct_option(), "");
    }

    #[test]
    fn test_difficulty_parse_and_default() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_option_policy() {
        assert!(OptionPolicy::Exact(4).allows(4));
        assert!(!OptionPolicy::Exact(4).allows(5));
        assert!(OptionPolicy::AtLeast(2).allows(7));
        assert!(!OptionPolicy::AtLeast(2).allows(1));

        let parsed: OptionPolicy = serde_json::from_str(r#"{"at_least": 2}"#).unwrap();
        assert_eq!(parsed, OptionPolicy::AtLeast(2));
    }

    #[test]
    fn test_narration() {
        let set = QuestionSet {
            topic: "US history".to_string(),
            difficulty: Difficulty::Hard,
            questions: vec![],
        };
        assert_eq!(set.narration(), "Starting a hard quiz on US history.");
    }
}
