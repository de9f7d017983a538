//! SQLite connector backed by rusqlite

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};
use rusqlite::OpenFlags;

use super::{Connection, Connector};
use crate::binder::ParameterSet;
use crate::config::DatabaseConfig;
use crate::dialect::Dialect;
use crate::encoder::{Row, RowSet};
use crate::types::{SqlError, SqlResult};
use crate::value::{ColumnKind, SqlValue, DATETIME_FORMAT};

/// Opens a fresh connection to a SQLite database file per operation
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    path: PathBuf,
    read_only: bool,
    busy_timeout: Duration,
}

impl SqliteConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_only: true,
            busy_timeout: Duration::from_secs(30),
        }
    }

    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            path: config.resolved_path(),
            read_only: config.read_only,
            busy_timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Open the database read-write (it must already exist)
    pub fn writable(mut self) -> Self {
        self.read_only = false;
        self
    }

    fn flags(&self) -> OpenFlags {
        let access = if self.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE
        };
        access | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX
    }
}

#[async_trait]
impl Connector for SqliteConnector {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn open(&self) -> SqlResult<Box<dyn Connection>> {
        // SQLite treats an empty path as a private temporary database
        if self.path.as_os_str().is_empty() {
            return Err(SqlError::Config("database path is empty".to_string()));
        }

        let conn = rusqlite::Connection::open_with_flags(&self.path, self.flags()).map_err(|e| {
            SqlError::Connection(format!("Failed to open database at {:?}: {}", self.path, e))
        })?;

        conn.busy_timeout(self.busy_timeout)
            .map_err(|e| SqlError::Connection(format!("Failed to set busy timeout: {}", e)))?;

        tracing::debug!(path = ?self.path, read_only = self.read_only, "Opened SQLite connection");

        Ok(Box::new(SqliteConnection { conn }))
    }
}

struct SqliteConnection {
    conn: rusqlite::Connection,
}

#[async_trait]
impl Connection for SqliteConnection {
    async fn query(&mut self, sql: &str, params: &ParameterSet) -> SqlResult<RowSet> {
        let dialect = Dialect::Sqlite;

        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| SqlError::Execution(format!("Failed to prepare query: {}", e)))?;

        let mut bound = vec![false; stmt.parameter_count()];
        for (name, value) in params.iter() {
            let bind_name = dialect.bind_name(name);
            match stmt.parameter_index(&bind_name)? {
                Some(index) => {
                    stmt.raw_bind_parameter(index, value).map_err(|e| {
                        SqlError::Execution(format!("Failed to bind {}: {}", bind_name, e))
                    })?;
                    bound[index - 1] = true;
                }
                None => tracing::debug!(parameter = %bind_name, "Parameter not referenced by query"),
            }
        }

        // SQLite would run an unbound marker as NULL
        if let Some(missing) = bound.iter().position(|b| !b) {
            let index = missing + 1;
            let marker = stmt
                .parameter_name(index)
                .map(str::to_string)
                .unwrap_or_else(|| format!("?{}", index));
            return Err(SqlError::Execution(format!("parameter {} has no value", marker)));
        }

        let columns: Vec<(String, ColumnKind)> = stmt
            .columns()
            .iter()
            .map(|c| (c.name().to_string(), ColumnKind::from_declared(c.decl_type())))
            .collect();

        let mut rows = stmt.raw_query();
        let mut result = RowSet::new();

        while let Some(row) = rows
            .next()
            .map_err(|e| SqlError::Execution(format!("Query failed: {}", e)))?
        {
            let mut record = Row::with_capacity(columns.len());
            for (index, (name, kind)) in columns.iter().enumerate() {
                let raw = from_value_ref(row.get_ref(index)?);
                record.insert(name.as_str(), kind.refine(raw));
            }
            result.push(record);
        }

        Ok(result)
    }
}

impl Drop for SqliteConnection {
    fn drop(&mut self) {
        tracing::trace!("Closing SQLite connection");
    }
}

fn from_value_ref(value: ValueRef<'_>) -> SqlValue {
    match value {
        ValueRef::Null => SqlValue::Null,
        ValueRef::Integer(i) => SqlValue::Integer(i),
        ValueRef::Real(f) => SqlValue::Float(f),
        ValueRef::Text(bytes) => SqlValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => SqlValue::Binary(bytes.to_vec()),
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            SqlValue::Integer(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            SqlValue::Float(f) => ToSqlOutput::Owned(Value::Real(*f)),
            SqlValue::Boolean(b) => ToSqlOutput::Owned(Value::Integer(i64::from(*b))),
            SqlValue::DateTime(dt) => {
                ToSqlOutput::Owned(Value::Text(dt.format(DATETIME_FORMAT).to_string()))
            }
            SqlValue::Binary(bytes) => ToSqlOutput::Borrowed(ValueRef::Blob(bytes.as_slice())),
        })
    }
}
