//! Tool response helpers
//!
//! Tools answer with pretty-printed JSON. An answer the caller should treat
//! as a refusal, rather than data, is sent with `is_error` set.

use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;

fn to_json<T: Serialize>(data: &T) -> Result<Content, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(Content::text(json))
}

/// A successful response holding `data` as JSON
///
/// ```rust,ignore
/// let tables = service.available_tables(None).await?;
/// json_success(&tables)
/// ```
pub fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![to_json(data)?]))
}

/// A structured refusal: `data` as JSON with `is_error` set
///
/// For outcomes that are expected and well-formed but are not results, such
/// as a policy rejecting a request. Protocol and server failures should be
/// returned as `McpError` instead.
pub fn json_error<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![to_json(data)?]))
}
