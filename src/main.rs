//! Quizaurus CLI
//!
//! MCP server 和终端答题入口

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quizaurus::{
    cli::{PlayArgs, ScoreArgs, ValidateArgs},
    config::config_dir,
    Config, McpServer,
};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "quizaurus=info";

#[derive(Parser)]
#[command(name = "quizaurus")]
#[command(about = "Quizaurus - 交互式测验 widget 和 MCP server")]
#[command(version)]
struct Cli {
    /// 配置文件路径 (默认: ~/.config/quizaurus/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 启动 MCP server (stdio)
    Serve,
    /// 在终端中答题
    Play(PlayArgs),
    /// 校验题目文件
    Validate(ValidateArgs),
    /// 计算成功率和鼓励语
    Score(ScoreArgs),
}

/// 日志写到 stderr；TUI 模式下写到 ~/.config/quizaurus/quizaurus.log
fn init_tracing(to_file: bool) -> Result<()> {
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if to_file {
        let dir = config_dir();
        std::fs::create_dir_all(&dir)?;
        let log_path = dir.join("quizaurus.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .init();
    } else {
        fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(matches!(cli.command, Commands::Play(_)))?;

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            let server = McpServer::new(config);
            server.run().await?;
        }
        Commands::Play(args) => {
            // TUI 是同步循环，放到阻塞线程里，webhook 仍可使用 runtime
            tokio::task::spawn_blocking(move || quizaurus::cli::handle_play(&config, args))
                .await??;
        }
        Commands::Validate(args) => {
            quizaurus::cli::handle_validate(&config, args)?;
        }
        Commands::Score(args) => {
            quizaurus::cli::handle_score(args)?;
        }
    }

    Ok(())
}
