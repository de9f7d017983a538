//! In-process tool dispatch
//!
//! [`EmbeddableMcp`] lets a host call a server's tools by name with a JSON
//! argument object, without a transport in between. Servers built with
//! `#[tool_router]` list their tools from the router and match on the name
//! in `call_tool`.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Error type for embeddable MCP operations
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    /// No tool with this name
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Arguments did not deserialize into the tool's parameter type
    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// The tool returned an MCP error
    #[error("mcp error: {0}")]
    McpError(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::McpError(err.message.to_string())
    }
}

/// Result type for embeddable MCP operations
pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// An MCP server whose tools can be invoked directly
///
/// Implementations must be `Send + Sync`; hosts may issue concurrent calls.
///
/// ```rust,ignore
/// let server = SqlGateMcpServer::new();
/// let result = server
///     .call_tool("execute_query", json!({"query": "SELECT 1 AS one"}))
///     .await?;
/// ```
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Name used for this server in MCP configuration files
    fn server_name(&self) -> &str;

    /// All tools with their names, descriptions and input schemas
    fn list_tools(&self) -> Vec<Tool>;

    /// Invoke the tool `name` with a JSON object of arguments
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    fn server_description(&self) -> Option<&str> {
        None
    }

    fn server_version(&self) -> Option<&str> {
        None
    }
}
