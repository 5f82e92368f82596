//! MCP Server - Model Context Protocol implementation

pub mod resources;
pub mod server;
pub mod session;
pub mod tools;
pub mod types;

pub use server::McpServer;
pub use session::McpSession;
pub use types::{McpError, McpRequest, McpResource, McpResponse, McpTool};
