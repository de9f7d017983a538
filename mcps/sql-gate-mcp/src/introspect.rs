//! Schema introspection through the fixed metadata queries

use std::sync::Arc;

use crate::binder::ParameterSet;
use crate::db::Connector;
use crate::dialect::{SCHEMA_NAME_PARAM, TABLE_NAME_PARAM};
use crate::gate::QueryGate;
use crate::types::{ColumnDescriptor, SqlResult, TableDescriptor};
use crate::value::SqlValue;

#[derive(Clone)]
pub struct SchemaIntrospector {
    gate: Arc<QueryGate>,
    connector: Arc<dyn Connector>,
}

impl SchemaIntrospector {
    pub fn new(gate: Arc<QueryGate>, connector: Arc<dyn Connector>) -> Self {
        Self { gate, connector }
    }

    /// Columns of `table_name` in ordinal order
    ///
    /// Columns belonging to a schema/table pair the policy hides are dropped,
    /// so a hidden or unknown table yields an empty list.
    pub async fn describe_table(&self, table_name: &str) -> SqlResult<Vec<ColumnDescriptor>> {
        let dialect = self.connector.dialect();

        let mut params = ParameterSet::new();
        params.insert(TABLE_NAME_PARAM, SqlValue::from(table_name))?;

        let rows = {
            let mut conn = self.connector.open().await?;
            conn.query(dialect.columns_query(), &params).await?
        };

        let mut columns = Vec::with_capacity(rows.len());
        for row in &rows {
            let schema = row
                .get("TABLE_SCHEMA")
                .and_then(SqlValue::as_str)
                .unwrap_or_else(|| dialect.default_schema());
            if !self.gate.is_table_allowed(table_name, schema) {
                tracing::debug!(table = %table_name, schema = %schema, "Column hidden by access policy");
                continue;
            }
            columns.push(ColumnDescriptor::from_row(row)?);
        }

        Ok(columns)
    }

    /// Base tables visible through the access policy, ordered by schema and
    /// name, optionally limited to one schema
    pub async fn list_tables(&self, schema_filter: Option<&str>) -> SqlResult<Vec<TableDescriptor>> {
        let dialect = self.connector.dialect();
        let schema_filter = schema_filter.filter(|s| !s.is_empty());

        let mut params = ParameterSet::new();
        if let Some(schema) = schema_filter {
            params.insert(SCHEMA_NAME_PARAM, SqlValue::from(schema))?;
        }

        let rows = {
            let mut conn = self.connector.open().await?;
            conn.query(&dialect.tables_query(schema_filter.is_some()), &params)
                .await?
        };

        let mut tables = Vec::with_capacity(rows.len());
        for row in &rows {
            let table = TableDescriptor::from_row(row)?;
            if self.gate.is_table_allowed(&table.name, &table.schema) {
                tables.push(table);
            }
        }

        Ok(tables)
    }
}
