//! Database connector abstraction
//!
//! A [`Connector`] opens one [`Connection`] per operation. Connections are
//! released when dropped, so every exit path of an operation closes its
//! connection. Currently ships a SQLite connector.

use async_trait::async_trait;

use crate::binder::ParameterSet;
use crate::dialect::Dialect;
use crate::encoder::RowSet;
use crate::types::SqlResult;

pub mod sqlite;

pub use sqlite::SqliteConnector;

/// Factory for scoped database connections
#[async_trait]
pub trait Connector: Send + Sync {
    /// SQL dialect spoken by connections from this connector
    fn dialect(&self) -> Dialect;

    /// Open a new connection
    async fn open(&self) -> SqlResult<Box<dyn Connection>>;
}

/// An open connection, closed on drop
#[async_trait]
pub trait Connection: Send {
    /// Prepare `sql`, bind `params` under the dialect's bind names, execute,
    /// and read every row in cursor order
    async fn query(&mut self, sql: &str, params: &ParameterSet) -> SqlResult<RowSet>;
}
