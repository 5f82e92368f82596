//! render-quiz tool handler
//!
//! Validates the model-provided questions and hands the cleaned set to the
//! widget as structured content.

use anyhow::Result;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::Config;
use crate::mcp::types::{InvalidParams, McpTool};
use crate::quiz::{validate_questions, Difficulty, QuestionSet, Validation};

pub const RENDER_QUIZ: &str = "render-quiz";

const DESCRIPTION: &str = "Create and render a quiz. \
The tool expects high-quality single-answer questions: \
each item needs { question, options[], correctIndex, explanation }. \
Use 5-10 questions unless the user requests a specific number of questions (keep it under 50). \
Do not provide any sensitive or personal user information to this tool.";

/// Tool descriptor for tools/list
pub fn definition(config: &Config) -> McpTool {
    let mut options_schema = serde_json::json!({
        "type": "array",
        "items": { "type": "string" }
    });
    if let (Some(schema), Some(bounds)) = (
        options_schema.as_object_mut(),
        config.option_policy.schema_bounds().as_object(),
    ) {
        schema.extend(bounds.clone());
    }

    McpTool {
        name: RENDER_QUIZ.to_string(),
        title: Some("Render Quiz".to_string()),
        description: DESCRIPTION.to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "Quiz topic (e.g., 'US history')."
                },
                "difficulty": {
                    "type": "string",
                    "enum": ["easy", "medium", "hard"],
                    "default": "medium"
                },
                "questions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "question": { "type": "string" },
                            "options": options_schema,
                            "correctIndex": { "type": "integer" },
                            "explanation": { "type": "string" }
                        },
                        "required": ["question", "options", "correctIndex"]
                    }
                }
            },
            "required": ["topic", "questions"]
        }),
        meta: Some(serde_json::json!({
            "openai/outputTemplate": config.widget_uri
        })),
    }
}

/// Parse tool arguments and validate the questions.
pub fn build_question_set(config: &Config, args: &Value) -> Result<(QuestionSet, Validation)> {
    let topic = args
        .get("topic")
        .and_then(|v| v.as_str())
        .ok_or_else(|| InvalidParams("missing topic".to_string()))?;

    let difficulty = match args.get("difficulty") {
        None | Some(Value::Null) => Difficulty::default(),
        Some(Value::String(s)) => s.parse::<Difficulty>().map_err(InvalidParams)?,
        Some(other) => {
            return Err(InvalidParams(format!("difficulty must be a string, got {}", other)).into())
        }
    };

    let candidates: &[Value] = match args.get("questions") {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items,
        Some(_) => return Err(InvalidParams("questions must be an array".to_string()).into()),
    };

    let validation = validate_questions(candidates, config.option_policy);
    let set = QuestionSet {
        topic: topic.to_string(),
        difficulty,
        questions: validation.questions.clone(),
    };

    Ok((set, validation))
}

/// Handle a render-quiz call
pub fn handle_render_quiz(config: &Config, args: &Value) -> Result<Value> {
    let (set, validation) = build_question_set(config, args)?;

    if set.is_empty() {
        warn!(topic = %set.topic, "render-quiz produced no valid questions");
    }
    info!(
        topic = %set.topic,
        difficulty = %set.difficulty,
        kept = set.len(),
        rejected = validation.rejections.len(),
        "Quiz rendered"
    );

    let mut meta = serde_json::json!({ "openai/locale": config.locale });
    if !validation.is_clean() {
        meta["quizaurus/rejections"] = serde_json::to_value(&validation.rejections)?;
    }

    Ok(serde_json::json!({
        "content": [{
            "type": "text",
            "text": set.narration()
        }],
        "structuredContent": serde_json::to_value(&set)?,
        "_meta": meta
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::types::error_code;
    use crate::quiz::OptionPolicy;
    use serde_json::json;

    fn args() -> Value {
        json!({
            "topic": "space",
            "difficulty": "easy",
            "questions": [
                {
                    "question": "Closest star?",
                    "options": ["Sun", "Sirius", "Vega", "Proxima"],
                    "correctIndex": 0
                },
                {
                    "question": "Broken",
                    "options": ["a", "b"],
                    "correctIndex": 0
                }
            ]
        })
    }

    #[test]
    fn test_render_quiz_filters_and_narrates() {
        let result = handle_render_quiz(&Config::default(), &args()).unwrap();

        assert_eq!(result["content"][0]["text"], "Starting a easy quiz on space.");
        let structured = &result["structuredContent"];
        assert_eq!(structured["topic"], "space");
        assert_eq!(structured["difficulty"], "easy");
        assert_eq!(structured["questions"].as_array().unwrap().len(), 1);
        assert_eq!(structured["questions"][0]["correctIndex"], 0);
        assert_eq!(result["_meta"]["openai/locale"], "en");
        assert_eq!(result["_meta"]["quizaurus/rejections"][0]["index"], 1);
    }

    #[test]
    fn test_at_least_policy_keeps_two_option_question() {
        let config = Config {
            option_policy: OptionPolicy::AtLeast(2),
            ..Config::default()
        };
        let result = handle_render_quiz(&config, &args()).unwrap();
        assert_eq!(result["structuredContent"]["questions"].as_array().unwrap().len(), 2);
        assert!(result["_meta"].get("quizaurus/rejections").is_none());
    }

    #[test]
    fn test_defaults_for_optional_arguments() {
        let (set, validation) =
            build_question_set(&Config::default(), &json!({ "topic": "empty" })).unwrap();
        assert_eq!(set.difficulty, Difficulty::Medium);
        assert!(set.is_empty());
        assert!(validation.is_clean());
    }

    #[test]
    fn test_invalid_arguments() {
        let config = Config::default();
        for bad in [
            json!({ "questions": [] }),
            json!({ "topic": "x", "difficulty": "extreme" }),
            json!({ "topic": "x", "difficulty": 3 }),
            json!({ "topic": "x", "questions": "none" }),
        ] {
            let err = build_question_set(&config, &bad).unwrap_err();
            assert_eq!(error_code(&err), -32602, "{}", bad);
        }
    }

    #[test]
    fn test_definition_follows_policy() {
        let tool = definition(&Config::default());
        let options = &tool.input_schema["properties"]["questions"]["items"]["properties"]["options"];
        assert_eq!(options["minItems"], 4);
        assert_eq!(options["maxItems"], 4);
        assert_eq!(
            tool.meta.unwrap()["openai/outputTemplate"],
            "ui://widget/interactive-quiz.html"
        );
    }
}
