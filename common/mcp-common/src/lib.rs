//! MCP Common - shared plumbing for the workspace's MCP servers
//!
//! - **Initialization**: [`init_tracing`] and the `serve_stdio!` macro
//! - **Results**: [`json_success`] and [`json_error`] tool responses
//! - **Errors**: MCP errors tagged with a machine-readable kind
//! - **Embeddable**: [`EmbeddableMcp`] for calling a server's tools in-process
//!
//! # Example
//!
//! ```rust,ignore
//! // main.rs
//! mcp_common::serve_stdio!(SqlGateMcpServer, "sql_gate_mcp");
//!
//! // a tool body
//! async fn get_available_tables(&self) -> Result<CallToolResult, McpError> {
//!     let tables = self.service.available_tables(None).await.map_err(to_mcp)?;
//!     json_success(&tables)
//! }
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

// Re-export commonly used items at crate root
pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{internal_error_with_kind, invalid_params_with_kind, McpResult};
pub use init::init_tracing;
pub use result::{json_error, json_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
