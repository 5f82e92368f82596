//! MCP server 端到端测试：通过 stdio 风格的流驱动整个会话

use quizaurus::mcp::{McpRequest, McpSession};
use quizaurus::{Config, McpServer, QuestionSet, QuizRunner, QuizState};
use serde_json::{json, Value};
use tokio::io::BufReader;

fn question(text: &str, correct_index: i64) -> Value {
    json!({
        "question": text,
        "options": ["alpha", "beta", "gamma", "delta"],
        "correctIndex": correct_index,
        "explanation": format!("{} explained", text)
    })
}

fn test_config(assets_dir: &std::path::Path) -> Config {
    Config {
        assets_dir: assets_dir.to_path_buf(),
        record_host_events: false,
        ..Config::default()
    }
}

#[tokio::test]
async fn test_render_then_play_then_score() {
    // Given: 一个 server，三道题里有一道越界
    let server = McpServer::new(Config::default());
    let mut session = McpSession::new();

    // When: 调用 render-quiz
    let response = server
        .handle_request(
            &mut session,
            McpRequest::new(
                1,
                "tools/call",
                json!({
                    "name": "render-quiz",
                    "arguments": {
                        "topic": "Astronomy",
                        "difficulty": "hard",
                        "questions": [question("Q1", 0), question("Q2", 9), question("Q3", 3)]
                    }
                }),
            ),
        )
        .await
        .unwrap();

    // Then: 越界那题被丢弃，narration 和 locale 正确
    let result = response.result.unwrap();
    assert_eq!(
        result["content"][0]["text"],
        "Starting a hard quiz on Astronomy."
    );
    assert_eq!(result["_meta"]["openai/locale"], "en");
    assert_eq!(result["_meta"]["quizaurus/rejections"][0]["index"], 1);

    let set: QuestionSet = serde_json::from_value(result["structuredContent"].clone()).unwrap();
    assert_eq!(set.len(), 2);

    // When: 用返回的题目跑一轮，答对一题
    let mut runner = QuizRunner::new(set, Box::new(quizaurus::MultiChannel::new())).unwrap();
    runner.submit_answer(0).unwrap();
    runner.advance().unwrap();
    runner.submit_answer(0).unwrap();
    runner.advance().unwrap();
    assert_eq!(runner.state(), QuizState::ShowingResults);
    let local = runner.summary().unwrap().clone();

    // Then: 工具计分与本地计分一致
    let response = server
        .handle_request(
            &mut session,
            McpRequest::new(
                2,
                "tools/call",
                json!({
                    "name": "score-quiz-results",
                    "arguments": { "correctAnswersCount": 1, "totalQuestionsCount": 2 }
                }),
            ),
        )
        .await
        .unwrap();
    let scored = response.result.unwrap()["structuredContent"].clone();
    assert_eq!(scored["encouragement"], local.encouragement);
    assert_eq!(scored["successRate"], local.success_rate);
}

#[tokio::test]
async fn test_score_rejects_bad_counts() {
    let server = McpServer::new(Config::default());
    let mut session = McpSession::new();

    for args in [
        json!({ "correctAnswersCount": 1, "totalQuestionsCount": 0 }),
        json!({ "correctAnswersCount": 5, "totalQuestionsCount": 3 }),
        json!({ "correctAnswersCount": -1, "totalQuestionsCount": 3 }),
        json!({ "totalQuestionsCount": 3 }),
    ] {
        let response = server
            .handle_request(
                &mut session,
                McpRequest::new(
                    3,
                    "tools/call",
                    json!({ "name": "score-quiz-results", "arguments": args }),
                ),
            )
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32602, "args: {}", args);
    }
}

#[tokio::test]
async fn test_widget_resource_over_stream() {
    // Given: 资源目录里有构建产物
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("QuizaurusApp.js"), "render('</script>')").unwrap();
    std::fs::write(dir.path().join("QuizaurusApp.css"), ".quiz {}").unwrap();
    let server = McpServer::new(test_config(dir.path()));

    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"clientInfo":{"name":"host"}}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"resources/list"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":3,"method":"resources/read","params":{"uri":"ui://widget/interactive-quiz.html"}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":4,"method":"resources/read","params":{"uri":"ui://widget/other.html"}}"#,
        "\n"
    );
    let mut output = Vec::new();

    // When
    server
        .serve(BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();

    // Then: 4 条响应（notification 没有响应）
    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(responses.len(), 4);
    assert_eq!(
        responses[1]["result"]["resources"][0]["mimeType"],
        "text/html+skybridge"
    );

    let html = responses[2]["result"]["contents"][0]["text"].as_str().unwrap();
    assert!(html.contains(".quiz {}"));
    assert!(html.contains(r"render('<\/script>')"));
    assert!(html.ends_with("</script>"));

    assert_eq!(responses[3]["error"]["code"], -32602);
}

#[tokio::test]
async fn test_missing_assets_is_internal_error() {
    let dir = tempfile::tempdir().unwrap();
    let server = McpServer::new(test_config(dir.path()));
    let mut session = McpSession::new();

    let response = server
        .handle_request(
            &mut session,
            McpRequest::new(
                1,
                "resources/read",
                json!({ "uri": "ui://widget/interactive-quiz.html" }),
            ),
        )
        .await
        .unwrap();
    let error = response.error.unwrap();
    assert_eq!(error.code, -32603);
    assert!(error.message.contains("QuizaurusApp"));
}
