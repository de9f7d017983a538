//! Result encoding
//!
//! Rows keep the cursor's column order and serialize as JSON objects.
//! A query either produces rows or is rejected by the gate; both are
//! ordinary outcomes, distinct from a failed execution.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::value::SqlValue;

/// One result row: column name to value, in cursor order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, SqlValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    /// Insert a column value. A repeated name replaces the earlier value
    /// but keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: SqlValue) {
        let name = name.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.columns.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Rows in cursor order
pub type RowSet = Vec<Row>;

/// Message returned when the query gate refuses a query
pub const QUERY_NOT_ALLOWED: &str = "Query not allowed";

/// Message returned when the access policy hides the sampled table
pub const TABLE_NOT_ALLOWED: &str = "Table not allowed";

/// Outcome of running a caller query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutcome {
    Rows {
        rows: RowSet,
        #[serde(rename = "rowCount")]
        row_count: usize,
    },
    Rejected {
        error: String,
    },
}

impl QueryOutcome {
    pub fn from_rows(rows: RowSet) -> Self {
        QueryOutcome::Rows {
            row_count: rows.len(),
            rows,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        QueryOutcome::Rejected {
            error: reason.into(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, QueryOutcome::Rejected { .. })
    }

    pub fn rows(&self) -> &[Row] {
        match self {
            QueryOutcome::Rows { rows, .. } => rows,
            QueryOutcome::Rejected { .. } => &[],
        }
    }
}
