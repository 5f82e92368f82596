//! 本地文件渠道 - 将宿主事件写入 JSONL 文件

use anyhow::Result;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::channel::{HostChannel, HostEvent, HostEventRecord};

/// 本地文件渠道
pub struct LocalFileChannel {
    path: PathBuf,
}

impl LocalFileChannel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 默认路径 ~/.config/quizaurus/host_events.jsonl
    pub fn default_path() -> PathBuf {
        crate::config::config_dir().join("host_events.jsonl")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 追加一条记录（带文件锁）
    pub fn append(&self, record: &HostEventRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;
        let written = writeln!(file, "{}", serde_json::to_string(record)?);
        file.unlock()?;
        written?;

        Ok(())
    }

    /// 读取全部记录，跳过无法解析的行
    pub fn read_all(&self) -> Vec<HostEventRecord> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(_) => return Vec::new(),
        };

        BufReader::new(file)
            .lines()
            .map_while(|line| line.ok())
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect()
    }
}

impl HostChannel for LocalFileChannel {
    fn name(&self) -> &str {
        "local_file"
    }

    fn notify(&self, event: &HostEvent) -> Result<()> {
        // 本地文件写入很快，直接同步执行
        match self.append(&event.to_record()) {
            Ok(()) => {
                debug!(channel = "local_file", kind = event.kind(), "Host event recorded");
                Ok(())
            }
            Err(e) => {
                warn!(
                    channel = "local_file",
                    path = %self.path.display(),
                    error = %e,
                    "Failed to write host event"
                );
                Err(e)
            }
        }
    }
}
