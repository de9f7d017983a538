//! SQL service - the four guarded database operations
//!
//! Wires one [`QueryGate`] and one [`Connector`] into the executor and the
//! introspector. Arguments are assumed to be validated by the caller.

use std::sync::Arc;

use serde_json::Value;

use crate::db::Connector;
use crate::dialect::Dialect;
use crate::encoder::{QueryOutcome, TABLE_NOT_ALLOWED};
use crate::executor::QueryExecutor;
use crate::gate::{AccessPolicy, QueryGate};
use crate::introspect::SchemaIntrospector;
use crate::types::{SqlResult, TableList, TableSchema};

/// Maximum number of rows returned by [`SqlService::sample_data`]
pub const SAMPLE_ROW_LIMIT: usize = 10;

#[derive(Clone)]
pub struct SqlService {
    gate: Arc<QueryGate>,
    dialect: Dialect,
    executor: QueryExecutor,
    introspector: SchemaIntrospector,
}

impl SqlService {
    pub fn new(policy: AccessPolicy, connector: Arc<dyn Connector>) -> Self {
        let gate = Arc::new(QueryGate::new(policy));
        Self {
            dialect: connector.dialect(),
            executor: QueryExecutor::new(Arc::clone(&gate), Arc::clone(&connector)),
            introspector: SchemaIntrospector::new(Arc::clone(&gate), connector),
            gate,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Run a read-only caller query
    pub async fn execute_query(
        &self,
        query: &str,
        parameters: Option<&Value>,
    ) -> SqlResult<QueryOutcome> {
        self.executor.run(query, parameters).await
    }

    /// Column metadata for one table
    pub async fn table_schema(&self, table_name: &str) -> SqlResult<TableSchema> {
        let columns = self.introspector.describe_table(table_name).await?;
        Ok(TableSchema {
            table_name: table_name.to_string(),
            columns,
        })
    }

    /// Base tables visible through the access policy
    pub async fn available_tables(&self, schema_name: Option<&str>) -> SqlResult<TableList> {
        let tables = self.introspector.list_tables(schema_name).await?;
        Ok(TableList { tables })
    }

    /// First rows of a table in the default schema
    pub async fn sample_data(&self, table_name: &str) -> SqlResult<QueryOutcome> {
        let schema = self.dialect.default_schema();

        if !self.gate.is_table_allowed(table_name, schema) {
            tracing::warn!(table = %table_name, schema = %schema, "Table not allowed");
            return Ok(QueryOutcome::rejected(TABLE_NOT_ALLOWED));
        }

        let query = self.dialect.sample_query(schema, table_name, SAMPLE_ROW_LIMIT);
        self.executor.run(&query, None).await
    }
}
