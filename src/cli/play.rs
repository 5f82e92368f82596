//! Play 命令 - 在终端里答题

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::cli::load_quiz_file;
use crate::config::Config;
use crate::host::channels_from_config;
use crate::runner::QuizRunner;
use crate::tui::{init_terminal, restore_terminal, run, App};

/// Play 命令参数
#[derive(Args)]
pub struct PlayArgs {
    /// 题目文件 (render-quiz 参数或 structuredContent)
    pub file: PathBuf,

    /// 界面刷新间隔 (毫秒)
    #[arg(long, default_value = "250")]
    pub tick_ms: u64,
}

/// 构建 TUI 应用；没有有效题目时停留在 loading 页
pub fn build_app(config: &Config, args: &PlayArgs) -> Result<App> {
    let (set, validation) = load_quiz_file(config, &args.file)?;
    if !validation.is_clean() {
        warn!(
            rejected = validation.rejections.len(),
            "Some questions were dropped"
        );
    }
    if set.is_empty() {
        return Ok(App::loading(format!(
            "No valid questions in {}",
            args.file.display()
        )));
    }

    let host = channels_from_config(config);
    info!(channels = host.len(), topic = %set.topic, "Starting terminal quiz");
    Ok(App::new(QuizRunner::new(set, Box::new(host))?))
}

/// 处理 play 命令
pub fn handle_play(config: &Config, args: PlayArgs) -> Result<()> {
    let mut app = build_app(config, &args)?;

    let mut terminal = init_terminal()?;
    let result = run(&mut terminal, &mut app, Duration::from_millis(args.tick_ms));
    restore_terminal(&mut terminal)?;

    result
}
