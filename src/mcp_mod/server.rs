//! MCP Server - JSON-RPC 2.0 over stdio

use anyhow::Result;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use super::resources;
use super::session::McpSession;
use super::tools;
use super::types::{
    InvalidParams, McpRequest, McpResponse, MethodNotFound, INVALID_REQUEST, PARSE_ERROR,
};
use crate::config::Config;

pub const SERVER_NAME: &str = "quizaurus-server";
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP Server
///
/// 不持有可变状态；连接级状态在 `McpSession` 中。
pub struct McpServer {
    pub config: Config,
}

impl McpServer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 运行 MCP Server (stdio 模式)
    pub async fn run(&self) -> Result<()> {
        info!(
            policy = %self.config.option_policy,
            widget = %self.config.widget_uri,
            "Quizaurus MCP server started (stdio)"
        );
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// 处理一个连接直到 EOF
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut session = McpSession::new();
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;
            if bytes_read == 0 {
                break; // EOF
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<McpRequest>(trimmed) {
                Ok(request) => self.handle_request(&mut session, request).await,
                Err(e) => {
                    warn!(error = %e, "Failed to parse request");
                    Some(McpResponse::error(
                        None,
                        PARSE_ERROR,
                        format!("Parse error: {}", e),
                    ))
                }
            };

            if let Some(response) = response {
                let json = serde_json::to_string(&response)?;
                writer.write_all(json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        session.close();
        Ok(())
    }

    /// 处理 MCP 请求；notification 返回 None
    pub async fn handle_request(
        &self,
        session: &mut McpSession,
        request: McpRequest,
    ) -> Option<McpResponse> {
        session.handled += 1;
        debug!(session_id = %session.id, method = %request.method, id = ?request.id, "Request received");

        if request.is_notification() {
            if request.jsonrpc != "2.0" {
                warn!(
                    method = %request.method,
                    jsonrpc = %request.jsonrpc,
                    "Notification with invalid JSON-RPC version dropped"
                );
                return None;
            }
            self.handle_notification(session, &request);
            return None;
        }

        if request.jsonrpc != "2.0" {
            return Some(McpResponse::error(
                request.id,
                INVALID_REQUEST,
                format!(
                    "Invalid JSON-RPC version: expected 2.0, got {}",
                    request.jsonrpc
                ),
            ));
        }

        let result = match request.method.as_str() {
            "initialize" => {
                session.on_initialize(request.params.as_ref());
                Ok(self.handle_initialize())
            }
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(request.params.as_ref()),
            "resources/list" => self.handle_resources_list(),
            "resources/read" => self.handle_resources_read(request.params.as_ref()),
            _ => Err(MethodNotFound(request.method.clone()).into()),
        };

        Some(match result {
            Ok(value) => McpResponse::success(request.id, value),
            Err(e) => {
                warn!(method = %request.method, error = %e, "Request failed");
                McpResponse::from_error(request.id, &e)
            }
        })
    }

    fn handle_notification(&self, session: &mut McpSession, request: &McpRequest) {
        match request.method.as_str() {
            "notifications/initialized" => {
                session.initialized = true;
                info!(session_id = %session.id, "MCP client initialized");
            }
            other => debug!(method = other, "Notification ignored"),
        }
    }

    /// 处理 initialize
    fn handle_initialize(&self) -> Value {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {},
                "resources": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    /// 处理 tools/list
    fn handle_tools_list(&self) -> Result<Value> {
        Ok(serde_json::json!({
            "tools": tools::definitions(&self.config)
        }))
    }

    /// 处理 tools/call
    fn handle_tools_call(&self, params: Option<&Value>) -> Result<Value> {
        let params = params.ok_or_else(|| InvalidParams("Missing params".to_string()))?;
        let name = params["name"]
            .as_str()
            .ok_or_else(|| InvalidParams("Missing tool name".to_string()))?;
        let empty = serde_json::json!({});
        let args = params.get("arguments").unwrap_or(&empty);

        info!(tool = name, "Tool called");
        tools::call(&self.config, name, args)
    }

    /// 处理 resources/list
    fn handle_resources_list(&self) -> Result<Value> {
        Ok(serde_json::json!({
            "resources": resources::definitions(&self.config)
        }))
    }

    /// 处理 resources/read
    fn handle_resources_read(&self, params: Option<&Value>) -> Result<Value> {
        let uri = params
            .and_then(|p| p["uri"].as_str())
            .ok_or_else(|| InvalidParams("Missing uri".to_string()))?;
        resources::read(&self.config, uri)
    }
}
