//! Score 命令 - 计算成功率和鼓励语

use anyhow::Result;
use clap::Args;

use crate::cli::format_output;
use crate::quiz::{score, ScoreSummary};

/// Score 命令参数
#[derive(Args)]
pub struct ScoreArgs {
    /// 答对题数
    pub correct: u32,

    /// 总题数
    pub total: u32,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

fn plain(summary: &ScoreSummary) -> String {
    format!(
        "{}/{} ({}) {}",
        summary.correct_count,
        summary.total_count,
        summary.percent(),
        summary.encouragement
    )
}

/// 处理 score 命令
pub fn handle_score(args: ScoreArgs) -> Result<()> {
    let summary = score(args.correct, args.total)?;
    println!("{}", format_output(&summary, args.json, plain));
    Ok(())
}
