//! MCP Server implementation for guarded SQL access
//!
//! This module defines the MCP server that exposes the database as tools.
//! Handler implementations are in the handlers module.

use std::sync::Arc;

use mcp_common::{
    async_trait, CallToolResult, EmbeddableError, EmbeddableMcp, EmbeddableResult, McpError, Tool,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::config::SqlConfig;
use crate::db::{Connector, SqliteConnector};
use crate::gate::AccessPolicy;
use crate::handlers;
use crate::params::*;
use crate::service::SqlService;

const INSTRUCTIONS: &str = "Read-only SQL database MCP server. \
    Use get_available_tables to list queryable tables, get_table_schema to get \
    column definitions, get_sample_data to preview rows, and execute_query to run \
    SELECT queries with @name parameters. Statements containing INSERT, UPDATE, \
    DELETE, DROP, CREATE, ALTER or EXEC are refused.";

/// The SQL gate MCP server
#[derive(Clone)]
pub struct SqlGateMcpServer {
    service: SqlService,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router - Each tool delegates to its handler
// ============================================================================

#[tool_router]
impl SqlGateMcpServer {
    /// Create a new server from the config file, or defaults if it cannot be
    /// loaded
    pub fn new() -> Self {
        let config = SqlConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {:#}. Using default.", e);
            SqlConfig::default()
        });
        Self::with_config(&config)
    }

    /// Create a server for a SQLite database described by `config`
    pub fn with_config(config: &SqlConfig) -> Self {
        let connector = SqliteConnector::from_config(&config.database);
        let policy = AccessPolicy::from_config(&config.access, connector.dialect());

        tracing::info!(
            path = ?config.database.resolved_path(),
            read_only = config.database.read_only,
            schemas = ?policy.allowed_schemas(),
            tables = ?policy.allowed_tables(),
            "Configured SQL gate"
        );

        Self::with_service(SqlService::new(policy, Arc::new(connector)))
    }

    /// Create a server around an existing service, e.g. one using a custom
    /// connector
    pub fn with_service(service: SqlService) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Execute a read-only SQL SELECT query. Returns rows as objects keyed by column name plus rowCount.")]
    async fn execute_query(
        &self,
        Parameters(params): Parameters<ExecuteQueryParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::execute_query(&self.service, params).await
    }

    #[tool(description = "Get the schema information (columns, types, nullability, defaults) for a specific table.")]
    async fn get_table_schema(
        &self,
        Parameters(params): Parameters<TableSchemaParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_table_schema(&self.service, params).await
    }

    #[tool(description = "List all available tables that can be queried, optionally filtered by schema.")]
    async fn get_available_tables(
        &self,
        Parameters(params): Parameters<AvailableTablesParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_available_tables(&self.service, params).await
    }

    #[tool(description = "Get sample data from a table (limited to 10 rows).")]
    async fn get_sample_data(
        &self,
        Parameters(params): Parameters<SampleDataParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_sample_data(&self.service, params).await
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for SqlGateMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

impl Default for SqlGateMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for SqlGateMcpServer {
    fn server_name(&self) -> &str {
        "sql-gate"
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "execute_query" => {
                let params: ExecuteQueryParams = serde_json::from_value(params)?;
                self.execute_query(Parameters(params)).await.map_err(Into::into)
            }

            "get_table_schema" => {
                let params: TableSchemaParams = serde_json::from_value(params)?;
                self.get_table_schema(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            "get_available_tables" => {
                let params: AvailableTablesParams = if params.is_null() {
                    AvailableTablesParams::default()
                } else {
                    serde_json::from_value(params)?
                };
                self.get_available_tables(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            "get_sample_data" => {
                let params: SampleDataParams = serde_json::from_value(params)?;
                self.get_sample_data(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}
