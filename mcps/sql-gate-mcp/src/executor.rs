//! Query execution
//!
//! Runs caller queries through the gate, binds their parameters and reads
//! the full result over a connection scoped to the call.

use std::sync::Arc;

use serde_json::Value;

use crate::binder::ParameterSet;
use crate::db::Connector;
use crate::encoder::{QueryOutcome, QUERY_NOT_ALLOWED};
use crate::gate::QueryGate;
use crate::types::SqlResult;

#[derive(Clone)]
pub struct QueryExecutor {
    gate: Arc<QueryGate>,
    connector: Arc<dyn Connector>,
}

impl QueryExecutor {
    pub fn new(gate: Arc<QueryGate>, connector: Arc<dyn Connector>) -> Self {
        Self { gate, connector }
    }

    /// Run a caller query with an optional parameter payload
    ///
    /// A query refused by the gate yields [`QueryOutcome::Rejected`] without
    /// touching the database. Malformed parameters fail before a connection
    /// is opened.
    pub async fn run(&self, query: &str, parameters: Option<&Value>) -> SqlResult<QueryOutcome> {
        if !self.gate.is_query_allowed(query) {
            tracing::warn!(query = %query, "Query not allowed");
            return Ok(QueryOutcome::rejected(QUERY_NOT_ALLOWED));
        }

        let params = ParameterSet::from_json(parameters)?;
        self.run_bound(query, &params).await
    }

    /// Execute an admitted query with already decoded parameters
    async fn run_bound(&self, query: &str, params: &ParameterSet) -> SqlResult<QueryOutcome> {
        let mut conn = self.connector.open().await?;

        tracing::debug!(parameters = params.len(), "Executing query");
        let rows = conn.query(query, params).await?;
        tracing::debug!(row_count = rows.len(), "Query completed");

        Ok(QueryOutcome::from_rows(rows))
    }
}
