//! Tool handlers
//!
//! Each handler validates its arguments, delegates to the [`SqlService`] and
//! encodes the outcome. Gate rejections come back as structured error
//! content; driver failures become MCP errors tagged with their kind.

use mcp_common::{
    internal_error_with_kind, invalid_params_with_kind, json_error, json_success, CallToolResult,
    McpError,
};

use crate::encoder::QueryOutcome;
use crate::params::*;
use crate::service::SqlService;
use crate::types::SqlError;

// ============================================================================
// Helper Functions
// ============================================================================

fn sql_error_to_mcp(err: SqlError) -> McpError {
    match &err {
        SqlError::InvalidArgument(_) | SqlError::ParameterFormat(_) => {
            invalid_params_with_kind(err.to_string(), err.kind())
        }
        SqlError::Connection(_) | SqlError::Execution(_) | SqlError::Config(_) => {
            tracing::error!(kind = err.kind(), error = %err, "SQL operation failed");
            internal_error_with_kind(err.to_string(), err.kind())
        }
    }
}

/// Reject missing or whitespace-only required arguments
fn require_non_blank<'a>(name: &str, value: &'a str) -> Result<&'a str, SqlError> {
    if value.trim().is_empty() {
        return Err(SqlError::InvalidArgument(format!(
            "{} cannot be null or empty",
            name
        )));
    }
    Ok(value)
}

fn outcome_result(outcome: &QueryOutcome) -> Result<CallToolResult, McpError> {
    match outcome {
        QueryOutcome::Rows { .. } => json_success(outcome),
        QueryOutcome::Rejected { .. } => json_error(outcome),
    }
}

// ============================================================================
// Handler Functions
// ============================================================================

pub async fn execute_query(
    service: &SqlService,
    params: ExecuteQueryParams,
) -> Result<CallToolResult, McpError> {
    let query = require_non_blank("query", &params.query).map_err(sql_error_to_mcp)?;
    tracing::info!(tool = "execute_query", "Running query");

    let outcome = service
        .execute_query(query, params.parameters.as_ref())
        .await
        .map_err(sql_error_to_mcp)?;

    outcome_result(&outcome)
}

pub async fn get_table_schema(
    service: &SqlService,
    params: TableSchemaParams,
) -> Result<CallToolResult, McpError> {
    let table = require_non_blank("tableName", &params.table_name).map_err(sql_error_to_mcp)?;
    tracing::info!(tool = "get_table_schema", table = %table, "Describing table");

    let schema = service.table_schema(table).await.map_err(sql_error_to_mcp)?;
    json_success(&schema)
}

pub async fn get_available_tables(
    service: &SqlService,
    params: AvailableTablesParams,
) -> Result<CallToolResult, McpError> {
    tracing::info!(tool = "get_available_tables", schema = ?params.schema_name, "Listing tables");

    let tables = service
        .available_tables(params.schema_name.as_deref())
        .await
        .map_err(sql_error_to_mcp)?;
    json_success(&tables)
}

pub async fn get_sample_data(
    service: &SqlService,
    params: SampleDataParams,
) -> Result<CallToolResult, McpError> {
    let table = require_non_blank("tableName", &params.table_name).map_err(sql_error_to_mcp)?;
    tracing::info!(tool = "get_sample_data", table = %table, "Sampling table");

    let outcome = service.sample_data(table).await.map_err(sql_error_to_mcp)?;
    outcome_result(&outcome)
}
