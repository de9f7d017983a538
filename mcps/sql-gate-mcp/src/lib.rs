//! SQL Gate MCP Library
//!
//! Guarded, read-only access to a relational database for tool-calling
//! clients. Every query passes a keyword gate, parameters are bound by name,
//! and table listing, description and sampling respect a schema/table
//! allow-list.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sql_gate_mcp::{AccessPolicy, SqlService, SqliteConnector};
//!
//! let connector = SqliteConnector::new("app.db");
//! let service = SqlService::new(AccessPolicy::for_dialect(connector.dialect()), Arc::new(connector));
//! let outcome = service.execute_query("SELECT * FROM orders WHERE id = @id", Some(&json!({"id": 5}))).await?;
//! ```

pub mod binder;
pub mod config;
pub mod db;
pub mod dialect;
pub mod encoder;
pub mod executor;
pub mod gate;
pub mod handlers;
pub mod introspect;
pub mod params;
pub mod server;
pub mod service;
pub mod types;
pub mod value;

// Re-export main server type
pub use server::SqlGateMcpServer;

// Re-export the core for direct API usage
pub use binder::ParameterSet;
pub use config::SqlConfig;
pub use db::{Connection, Connector, SqliteConnector};
pub use dialect::Dialect;
pub use encoder::{QueryOutcome, Row, RowSet};
pub use gate::{AccessPolicy, QueryGate};
pub use service::SqlService;
pub use types::{ColumnDescriptor, SqlError, SqlResult, TableDescriptor};
pub use value::SqlValue;

// Re-export parameter types
pub use params::*;
