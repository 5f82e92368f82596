//! 每个连接一个 MCP 会话
//!
//! 会话随连接创建、随连接结束销毁，不放进任何全局表。

use chrono::{DateTime, Utc};
use tracing::info;

/// MCP 会话
#[derive(Debug, Clone)]
pub struct McpSession {
    pub id: String,
    pub started_at: DateTime<Utc>,
    /// initialize 时客户端上报的名称
    pub client_name: Option<String>,
    /// initialize 时客户端请求的协议版本
    pub protocol_version: Option<String>,
    /// 是否收到 notifications/initialized
    pub initialized: bool,
    /// 已处理的请求数（含 notification）
    pub handled: u64,
}

impl McpSession {
    pub fn new() -> Self {
        let started_at = Utc::now();
        let id = format!("mcp-{}", started_at.format("%Y%m%d%H%M%S%3f"));
        info!(session_id = %id, "MCP session opened");
        Self {
            id,
            started_at,
            client_name: None,
            protocol_version: None,
            initialized: false,
            handled: 0,
        }
    }

    /// 记录 initialize 参数
    pub fn on_initialize(&mut self, params: Option<&serde_json::Value>) {
        let Some(params) = params else { return };
        self.client_name = params["clientInfo"]["name"].as_str().map(str::to_string);
        self.protocol_version = params["protocolVersion"].as_str().map(str::to_string);
        info!(
            session_id = %self.id,
            client = ?self.client_name,
            protocol = ?self.protocol_version,
            "MCP client initializing"
        );
    }

    /// 连接结束
    pub fn close(self) {
        let elapsed = Utc::now().signed_duration_since(self.started_at);
        info!(
            session_id = %self.id,
            handled = self.handled,
            elapsed_secs = elapsed.num_seconds(),
            "MCP session closed"
        );
    }
}

impl Default for McpSession {
    fn default() -> Self {
        Self::new()
    }
}
