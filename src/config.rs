//! 配置 - ~/.config/quizaurus/config.json + 环境变量覆盖

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::quiz::OptionPolicy;

/// 默认 widget 资源 URI，必须与 render-quiz 的 outputTemplate 一致
pub const DEFAULT_WIDGET_URI: &str = "ui://widget/interactive-quiz.html";

/// 配置目录 ~/.config/quizaurus
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("quizaurus")
}

/// 服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 每题选项数量约束
    pub option_policy: OptionPolicy,
    /// 前端构建产物目录（QuizaurusApp.js / QuizaurusApp.css）
    pub assets_dir: PathBuf,
    /// widget 资源 URI
    pub widget_uri: String,
    /// 返回给 widget 的 openai/locale
    pub locale: String,
    /// 宿主事件 webhook（可选）
    pub webhook_url: Option<String>,
    /// webhook 超时（秒）
    pub webhook_timeout_secs: u64,
    /// 是否把宿主事件写入本地 JSONL
    pub record_host_events: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            option_policy: OptionPolicy::default(),
            assets_dir: PathBuf::from("../quizaurus-web/dist"),
            widget_uri: DEFAULT_WIDGET_URI.to_string(),
            locale: "en".to_string(),
            webhook_url: None,
            webhook_timeout_secs: 10,
            record_host_events: true,
        }
    }
}

impl Config {
    /// 默认配置文件路径
    pub fn default_path() -> PathBuf {
        config_dir().join("config.json")
    }

    /// 加载配置：文件不存在用默认值，再应用环境变量
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let default_path = Self::default_path();
        let path = path.unwrap_or(&default_path);

        let mut config = Self::from_file(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// 只读文件，不看环境变量
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// 环境变量覆盖，`lookup` 便于测试时替换
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("QUIZAURUS_ASSETS_DIR").filter(|v| !v.is_empty()) {
            self.assets_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup("QUIZAURUS_WEBHOOK_URL").filter(|v| !v.is_empty()) {
            self.webhook_url = Some(url);
        }
        if let Some(locale) = lookup("QUIZAURUS_LOCALE").filter(|v| !v.is_empty()) {
            self.locale = locale;
        }
    }
}
