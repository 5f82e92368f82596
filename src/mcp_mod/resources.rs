//! Widget 资源 - 把前端 JS/CSS 内联进 HTML 模板

use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

use crate::config::Config;
use crate::mcp::types::{InvalidParams, McpResource};

pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";
pub const WIDGET_SCRIPT: &str = "QuizaurusApp.js";
pub const WIDGET_STYLE: &str = "QuizaurusApp.css";

/// resources/list 的条目
pub fn definitions(config: &Config) -> Vec<McpResource> {
    vec![McpResource {
        uri: config.widget_uri.clone(),
        name: "interactive-quiz".to_string(),
        mime_type: WIDGET_MIME_TYPE.to_string(),
    }]
}

/// 防止内联脚本被 `</script` 提前截断
pub fn escape_inline_script(code: &str) -> String {
    static CLOSING_TAG: OnceLock<Regex> = OnceLock::new();
    let re = CLOSING_TAG.get_or_init(|| {
        Regex::new(r"(?i)</(script)").expect("closing tag pattern is valid")
    });
    re.replace_all(code, r"<\/$1").into_owned()
}

fn read_asset(dir: &Path, filename: &str) -> Result<String> {
    let path = dir.join(filename);
    std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read widget asset {}", path.display()))
}

/// 生成 widget HTML（每次读取都重新加载资源文件）
pub fn render_widget_html(assets_dir: &Path) -> Result<String> {
    let script = escape_inline_script(&read_asset(assets_dir, WIDGET_SCRIPT)?);
    let style = read_asset(assets_dir, WIDGET_STYLE)?;

    Ok(format!(
        "<div id=\"quizaurus-root\"></div>\n<style>\n{}\n</style>\n<script type=\"module\">\n{}\n</script>",
        style, script
    ))
}

/// 处理 resources/read
pub fn read(config: &Config, uri: &str) -> Result<serde_json::Value> {
    if uri != config.widget_uri {
        return Err(InvalidParams(format!("Unknown resource: {}", uri)).into());
    }

    let html = render_widget_html(&config.assets_dir)?;
    debug!(uri, bytes = html.len(), "Widget resource rendered");

    Ok(serde_json::json!({
        "contents": [{
            "uri": uri,
            "mimeType": WIDGET_MIME_TYPE,
            "text": html
        }]
    }))
}
