//! Type definitions for the SQL gate MCP

use serde::Serialize;
use thiserror::Error;

use crate::encoder::Row;
use crate::value::SqlValue;

// ============================================================================
// Schema Types
// ============================================================================

/// Column metadata as reported by the information schema
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    pub max_length: Option<i64>,
    pub precision: Option<i64>,
    pub scale: Option<i64>,
    pub default_value: Option<String>,
}

impl ColumnDescriptor {
    /// Build a descriptor from one row of the column introspection query
    pub fn from_row(row: &Row) -> SqlResult<Self> {
        Ok(Self {
            name: required_text(row, "COLUMN_NAME")?,
            data_type: required_text(row, "DATA_TYPE")?,
            nullable: row
                .get("IS_NULLABLE")
                .and_then(SqlValue::as_str)
                .is_some_and(|v| v.eq_ignore_ascii_case("YES")),
            max_length: row.get("CHARACTER_MAXIMUM_LENGTH").and_then(SqlValue::as_i64),
            precision: row.get("NUMERIC_PRECISION").and_then(SqlValue::as_i64),
            scale: row.get("NUMERIC_SCALE").and_then(SqlValue::as_i64),
            default_value: row
                .get("COLUMN_DEFAULT")
                .and_then(SqlValue::as_str)
                .map(str::to_string),
        })
    }
}

/// A table visible through the access policy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDescriptor {
    pub schema: String,
    pub name: String,
    #[serde(rename = "type")]
    pub table_type: String,
}

impl TableDescriptor {
    /// Build a descriptor from one row of the table listing query
    pub fn from_row(row: &Row) -> SqlResult<Self> {
        Ok(Self {
            schema: required_text(row, "TABLE_SCHEMA")?,
            name: required_text(row, "TABLE_NAME")?,
            table_type: required_text(row, "TABLE_TYPE")?,
        })
    }
}

fn required_text(row: &Row, column: &str) -> SqlResult<String> {
    row.get(column)
        .and_then(SqlValue::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            SqlError::Execution(format!("introspection row is missing text column {}", column))
        })
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for get_table_schema
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    pub table_name: String,
    pub columns: Vec<ColumnDescriptor>,
}

/// Response for get_available_tables
#[derive(Debug, Serialize)]
pub struct TableList {
    pub tables: Vec<TableDescriptor>,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum SqlError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid parameters: {0}")]
    ParameterFormat(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Execution(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl SqlError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            SqlError::InvalidArgument(_) => "invalid_argument",
            SqlError::ParameterFormat(_) => "parameter_format",
            SqlError::Connection(_) => "connection",
            SqlError::Execution(_) => "execution",
            SqlError::Config(_) => "config",
        }
    }
}

impl From<rusqlite::Error> for SqlError {
    fn from(err: rusqlite::Error) -> Self {
        SqlError::Execution(err.to_string())
    }
}

pub type SqlResult<T> = Result<T, SqlError>;
