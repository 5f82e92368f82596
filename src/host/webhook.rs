//! Webhook 渠道 - 通过 HTTP POST 把宿主事件转发出去

use anyhow::{anyhow, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::channel::{HostChannel, HostEvent, HostEventRecord};

/// Webhook 配置
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// 接收事件的 URL
    pub url: String,
    /// 超时时间 (秒)
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 10,
        }
    }
}

/// Webhook 渠道
#[derive(Debug, Clone)]
pub struct WebhookChannel {
    client: Client,
    config: WebhookConfig,
}

impl WebhookChannel {
    pub fn new(config: WebhookConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(anyhow!("webhook url is required"));
        }
        if !config.url.starts_with("http://") && !config.url.starts_with("https://") {
            return Err(anyhow!("webhook url must be http(s): {}", config.url));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// 同步等待发送结果
    pub async fn send(&self, record: &HostEventRecord) -> Result<()> {
        let response = self
            .client
            .post(&self.config.url)
            .json(record)
            .send()
            .await
            .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("webhook returned {}", status));
        }
        Ok(())
    }
}

impl HostChannel for WebhookChannel {
    fn name(&self) -> &str {
        "webhook"
    }

    fn notify(&self, event: &HostEvent) -> Result<()> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|_| anyhow!("webhook channel needs a tokio runtime"))?;

        let channel = self.clone();
        let record = event.to_record();
        handle.spawn(async move {
            match channel.send(&record).await {
                Ok(()) => debug!(channel = "webhook", kind = %record.kind, "Host event delivered"),
                Err(e) => warn!(
                    channel = "webhook",
                    kind = %record.kind,
                    error = %e,
                    "Host event delivery failed"
                ),
            }
        });
        Ok(())
    }
}
