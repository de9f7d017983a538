//! Parameter types for SQL gate MCP tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExecuteQueryParams {
    #[schemars(description = "The read-only SQL SELECT query to execute. Reference parameters as @name.")]
    pub query: String,

    #[schemars(
        description = "Optional query parameters as an object of name to scalar value, e.g. {\"id\": 5}"
    )]
    #[serde(default)]
    pub parameters: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TableSchemaParams {
    #[schemars(description = "The name of the table")]
    #[serde(rename = "tableName", alias = "table_name")]
    pub table_name: String,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct AvailableTablesParams {
    #[schemars(description = "Optional schema name to filter tables")]
    #[serde(rename = "schemaName", alias = "schema_name", default)]
    pub schema_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SampleDataParams {
    #[schemars(description = "The name of the table")]
    #[serde(rename = "tableName", alias = "table_name")]
    pub table_name: String,
}
