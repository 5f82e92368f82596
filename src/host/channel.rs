//! Host 通知渠道 trait 定义
//!
//! Runner 通过这里把答题状态和 follow-up 请求告诉宿主环境。所有发送都是
//! fire-and-forget：失败只记日志，不影响 runner 状态。

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// 发往宿主的事件
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// 当前答题记录（widget state）
    WidgetState { user_answers: Vec<usize> },
    /// 请宿主代用户发一条消息
    FollowUp { prompt: String },
}

impl HostEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            HostEvent::WidgetState { .. } => "widget_state",
            HostEvent::FollowUp { .. } => "follow_up",
        }
    }

    /// 宿主侧看到的 JSON 结构
    pub fn payload(&self) -> serde_json::Value {
        match self {
            HostEvent::WidgetState { user_answers } => {
                serde_json::json!({ "userAnswers": user_answers })
            }
            HostEvent::FollowUp { prompt } => serde_json::json!({ "prompt": prompt }),
        }
    }

    pub fn to_record(&self) -> HostEventRecord {
        HostEventRecord {
            ts: Utc::now(),
            kind: self.kind().to_string(),
            payload: self.payload(),
        }
    }
}

/// 事件记录（JSONL / webhook body）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostEventRecord {
    /// ISO8601 时间戳
    pub ts: DateTime<Utc>,
    /// 事件类型
    pub kind: String,
    /// 事件内容
    pub payload: serde_json::Value,
}

/// 宿主通知渠道
pub trait HostChannel: Send + Sync {
    /// 渠道名称（用于日志）
    fn name(&self) -> &str;

    /// 发送事件；网络渠道 spawn 后立即返回
    fn notify(&self, event: &HostEvent) -> Result<()>;
}

/// 扇出到多个渠道，单个渠道失败不影响其他渠道
#[derive(Default)]
pub struct MultiChannel {
    channels: Vec<Box<dyn HostChannel>>,
}

impl MultiChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(mut self, channel: Box<dyn HostChannel>) -> Self {
        self.channels.push(channel);
        self
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl HostChannel for MultiChannel {
    fn name(&self) -> &str {
        "multi"
    }

    fn notify(&self, event: &HostEvent) -> Result<()> {
        for channel in &self.channels {
            if let Err(e) = channel.notify(event) {
                warn!(
                    channel = channel.name(),
                    kind = event.kind(),
                    error = %e,
                    "Host notification failed"
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// 记录所有事件的假渠道
    #[derive(Clone, Default)]
    pub struct RecordingChannel {
        pub events: Arc<Mutex<Vec<HostEvent>>>,
    }

    impl RecordingChannel {
        pub fn events(&self) -> Vec<HostEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl HostChannel for RecordingChannel {
        fn name(&self) -> &str {
            "recording"
        }

        fn notify(&self, event: &HostEvent) -> Result<()> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    /// 总是失败的渠道
    pub struct FailingChannel;

    impl HostChannel for FailingChannel {
        fn name(&self) -> &str {
            "failing"
        }

        fn notify(&self, _event: &HostEvent) -> Result<()> {
            Err(anyhow::anyhow!("host unreachable"))
        }
    }
}
