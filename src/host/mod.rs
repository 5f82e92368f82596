//! 宿主通知：widget state 广播和 follow-up 消息

pub mod channel;
pub mod local_file;
pub mod webhook;

pub use channel::{HostChannel, HostEvent, HostEventRecord, MultiChannel};
pub use local_file::LocalFileChannel;
pub use webhook::{WebhookChannel, WebhookConfig};

use crate::config::Config;
use tracing::warn;

/// 按配置组装渠道；webhook 创建失败只记日志
pub fn channels_from_config(config: &Config) -> MultiChannel {
    let mut channels = MultiChannel::new();

    if config.record_host_events {
        channels = channels.with_channel(Box::new(LocalFileChannel::new(
            LocalFileChannel::default_path(),
        )));
    }

    if let Some(url) = config.webhook_url.as_deref().filter(|u| !u.is_empty()) {
        match WebhookChannel::new(WebhookConfig {
            url: url.to_string(),
            timeout_secs: config.webhook_timeout_secs,
        }) {
            Ok(webhook) => channels = channels.with_channel(Box::new(webhook)),
            Err(e) => warn!(error = %e, "Webhook channel disabled"),
        }
    }

    channels
}
