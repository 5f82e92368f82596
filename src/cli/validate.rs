//! Validate 命令 - 检查题目文件

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::{format_output, load_quiz_file};
use crate::config::Config;
use crate::quiz::{Difficulty, Rejection};

/// Validate 命令参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 题目文件 (render-quiz 参数或 structuredContent)
    pub file: PathBuf,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

/// Validate 命令输出
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOutput {
    pub topic: String,
    pub difficulty: Difficulty,
    pub accepted: usize,
    pub rejections: Vec<Rejection>,
}

impl ValidateOutput {
    fn plain(&self) -> String {
        let mut out = format!(
            "{} ({}): {} accepted, {} rejected",
            self.topic,
            self.difficulty,
            self.accepted,
            self.rejections.len()
        );
        for rejection in &self.rejections {
            out.push_str(&format!("\n  #{}: {}", rejection.index, rejection.reason));
        }
        out
    }
}

/// 检查文件，不启动答题
pub fn validate_file(config: &Config, args: &ValidateArgs) -> Result<ValidateOutput> {
    let (set, validation) = load_quiz_file(config, &args.file)?;
    Ok(ValidateOutput {
        topic: set.topic,
        difficulty: set.difficulty,
        accepted: set.questions.len(),
        rejections: validation.rejections,
    })
}

/// 处理 validate 命令
pub fn handle_validate(config: &Config, args: ValidateArgs) -> Result<()> {
    let output = validate_file(config, &args)?;
    println!("{}", format_output(&output, args.json, ValidateOutput::plain));
    Ok(())
}
