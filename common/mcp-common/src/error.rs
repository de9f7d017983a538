//! MCP error helpers
//!
//! Servers classify their failures with a short, stable `kind` string. The
//! kind travels in the error's `data` field so a caller can branch on it
//! without parsing the message.

use rmcp::ErrorData as McpError;
use serde_json::json;

/// Type alias for MCP tool results
pub type McpResult<T> = Result<T, McpError>;

/// An `invalid_params` error carrying `{"kind": kind}`
///
/// Use for failures caused by the caller's arguments.
///
/// ```rust,ignore
/// if query.trim().is_empty() {
///     return Err(invalid_params_with_kind("query cannot be empty", "invalid_argument"));
/// }
/// ```
pub fn invalid_params_with_kind(message: impl Into<String>, kind: &str) -> McpError {
    McpError::invalid_params(message.into(), Some(json!({ "kind": kind })))
}

/// An `internal_error` carrying `{"kind": kind}`
///
/// Use for failures of the server or the resource behind it.
pub fn internal_error_with_kind(message: impl Into<String>, kind: &str) -> McpError {
    McpError::internal_error(message.into(), Some(json!({ "kind": kind })))
}
