//! Integration tests against a real SQLite database
//!
//! Each test seeds a fresh database file in a temporary directory and talks
//! to it through the read-only connector, one connection per operation.

use std::path::PathBuf;
use std::sync::Arc;

use mcp_common::EmbeddableMcp;
use serde_json::json;
use sql_gate_mcp::{
    AccessPolicy, Dialect, QueryOutcome, SqlConfig, SqlError, SqlGateMcpServer, SqlService,
    SqlValue, SqliteConnector,
};
use tempfile::TempDir;

const SCHEMA: &str = r#"
    CREATE TABLE Customers (
        CustomerId INTEGER PRIMARY KEY,
        Name TEXT NOT NULL,
        Email TEXT,
        Status TEXT NOT NULL DEFAULT 'active',
        Active BOOLEAN NOT NULL DEFAULT 1,
        CreatedAt DATETIME,
        Avatar BLOB
    );
    CREATE TABLE orders (
        id INTEGER PRIMARY KEY,
        customer_id INTEGER NOT NULL,
        total REAL
    );
"#;

/// Create a database with 15 customers; every third one has no email
fn seed_database(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("shop.db");
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(SCHEMA).unwrap();

    for i in 1..=15i64 {
        let email = (i % 3 != 0).then(|| format!("c{}@example.com", i));
        conn.execute(
            "INSERT INTO Customers (CustomerId, Name, Email, CreatedAt) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![i, format!("Customer {}", i), email, "2024-01-01 10:00:00"],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO orders (customer_id, total) VALUES (?1, ?2)",
            rusqlite::params![i, i as f64 * 10.5],
        )
        .unwrap();
    }
    conn.execute(
        "UPDATE Customers SET Avatar = X'010203', Active = 0 WHERE CustomerId = 1",
        [],
    )
    .unwrap();

    path
}

fn service(path: PathBuf) -> SqlService {
    SqlService::new(
        AccessPolicy::for_dialect(Dialect::Sqlite),
        Arc::new(SqliteConnector::new(path)),
    )
}

#[tokio::test]
async fn test_parameter_selects_matching_rows() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(seed_database(&dir));

    let outcome = service
        .execute_query(
            "SELECT * FROM Customers WHERE CustomerId = @id",
            Some(&json!({"id": 5})),
        )
        .await
        .unwrap();

    let rows = outcome.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("CustomerId"), Some(&SqlValue::Integer(5)));
    assert_eq!(rows[0].get("Name"), Some(&SqlValue::from("Customer 5")));
}

#[tokio::test]
async fn test_null_parameter_binds_sql_null() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(seed_database(&dir));

    let outcome = service
        .execute_query(
            "SELECT COUNT(*) AS n, typeof(@email) AS kind FROM Customers WHERE Email IS @email",
            Some(&json!({"email": null})),
        )
        .await
        .unwrap();

    let row = &outcome.rows()[0];
    assert_eq!(row.get("n"), Some(&SqlValue::Integer(5)));
    assert_eq!(row.get("kind"), Some(&SqlValue::from("null")));
}

#[tokio::test]
async fn test_stringified_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(seed_database(&dir));

    let outcome = service
        .execute_query(
            "SELECT Name FROM Customers WHERE CustomerId = @id",
            Some(&json!("{\"id\": 2}")),
        )
        .await
        .unwrap();

    assert_eq!(outcome.rows()[0].get("Name"), Some(&SqlValue::from("Customer 2")));
}

#[tokio::test]
async fn test_column_types_are_mapped() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(seed_database(&dir));

    let outcome = service
        .execute_query(
            "SELECT CustomerId, Active, CreatedAt, Avatar, Email FROM Customers WHERE CustomerId IN (1, 3) ORDER BY CustomerId",
            None,
        )
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({
            "rows": [
                {
                    "CustomerId": 1,
                    "Active": false,
                    "CreatedAt": "2024-01-01T10:00:00",
                    "Avatar": "AQID",
                    "Email": "c1@example.com"
                },
                {
                    "CustomerId": 3,
                    "Active": true,
                    "CreatedAt": "2024-01-01T10:00:00",
                    "Avatar": null,
                    "Email": null
                }
            ],
            "rowCount": 2
        })
    );
}

#[tokio::test]
async fn test_forbidden_query_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(seed_database(&dir));

    let outcome = service.execute_query("DROP TABLE orders", None).await.unwrap();
    assert_eq!(outcome, QueryOutcome::rejected("Query not allowed"));

    // Table is still there
    let outcome = service
        .execute_query("SELECT COUNT(*) AS n FROM orders", None)
        .await
        .unwrap();
    assert_eq!(outcome.rows()[0].get("n"), Some(&SqlValue::Integer(15)));
}

#[tokio::test]
async fn test_read_only_connection_refuses_keyword_free_writes() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(seed_database(&dir));

    let err = service
        .execute_query("PRAGMA user_version = 7", None)
        .await
        .unwrap_err();

    assert!(matches!(err, SqlError::Execution(_)));
}

#[tokio::test]
async fn test_malformed_sql_is_execution_error() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(seed_database(&dir));

    let err = service
        .execute_query("SELECT FROM WHERE", None)
        .await
        .unwrap_err();

    assert!(matches!(err, SqlError::Execution(ref msg) if msg.contains("prepare")));
}

#[tokio::test]
async fn test_zero_rows_is_success() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(seed_database(&dir));

    let outcome = service
        .execute_query("SELECT * FROM orders WHERE id = @id", Some(&json!({"id": 999})))
        .await
        .unwrap();

    assert!(!outcome.is_rejected());
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({"rows": [], "rowCount": 0})
    );
}

#[tokio::test]
async fn test_sample_data_returns_at_most_ten_rows() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(seed_database(&dir));

    let outcome = service.sample_data("Customers").await.unwrap();

    assert_eq!(outcome.rows().len(), 10);
}

#[tokio::test]
async fn test_describe_table_in_ordinal_order() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(seed_database(&dir));

    let schema = service.table_schema("Customers").await.unwrap();

    let names: Vec<&str> = schema.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["CustomerId", "Name", "Email", "Status", "Active", "CreatedAt", "Avatar"]
    );

    let name = &schema.columns[1];
    assert_eq!(name.data_type, "TEXT");
    assert!(!name.nullable);

    let email = &schema.columns[2];
    assert!(email.nullable);
    assert_eq!(email.default_value, None);

    let status = &schema.columns[3];
    assert!(!status.nullable);
    assert_eq!(status.default_value.as_deref(), Some("'active'"));
}

#[tokio::test]
async fn test_describe_unknown_table_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(seed_database(&dir));

    let schema = service.table_schema("nope").await.unwrap();

    assert!(schema.columns.is_empty());
}

#[tokio::test]
async fn test_list_tables() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(seed_database(&dir));

    let all = service.available_tables(None).await.unwrap();
    let names: Vec<&str> = all.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Customers", "orders"]);
    assert!(all
        .tables
        .iter()
        .all(|t| t.schema == "main" && t.table_type == "BASE TABLE"));

    let main = service.available_tables(Some("main")).await.unwrap();
    assert_eq!(main.tables.len(), 2);

    let other = service.available_tables(Some("archive")).await.unwrap();
    assert!(other.tables.is_empty());
}

#[tokio::test]
async fn test_table_allow_list_applies_to_listing_and_sampling() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_database(&dir);
    let service = SqlService::new(
        AccessPolicy::new(["main"], ["orders"]),
        Arc::new(SqliteConnector::new(path)),
    );

    let tables = service.available_tables(None).await.unwrap();
    assert_eq!(tables.tables.len(), 1);
    assert_eq!(tables.tables[0].name, "orders");

    let sample = service.sample_data("Customers").await.unwrap();
    assert_eq!(sample, QueryOutcome::rejected("Table not allowed"));

    let schema = service.table_schema("Customers").await.unwrap();
    assert!(schema.columns.is_empty());

    // Ad-hoc queries are only keyword-gated
    let outcome = service
        .execute_query("SELECT COUNT(*) AS n FROM Customers", None)
        .await
        .unwrap();
    assert_eq!(outcome.rows()[0].get("n"), Some(&SqlValue::Integer(15)));
}

#[tokio::test]
async fn test_missing_database_is_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(dir.path().join("missing.db"));

    let err = service.execute_query("SELECT 1", None).await.unwrap_err();

    assert_eq!(err.kind(), "connection");
}

#[tokio::test]
async fn test_server_tools_over_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let server = SqlGateMcpServer::with_config(&SqlConfig::with_database(seed_database(&dir)));

    let result = server
        .call_tool(
            "execute_query",
            json!({"query": "SELECT Name FROM Customers WHERE CustomerId = @id", "parameters": {"id": 1}}),
        )
        .await
        .unwrap();
    assert!(!result.is_error.unwrap_or(false));

    let result = server
        .call_tool("get_sample_data", json!({"tableName": "orders"}))
        .await
        .unwrap();
    assert!(!result.is_error.unwrap_or(false));

    let result = server
        .call_tool("execute_query", json!({"query": "delete from orders"}))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
}

#[tokio::test]
async fn test_missing_parameter_is_execution_error() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(seed_database(&dir));

    let err = service
        .execute_query("SELECT * FROM orders WHERE id = @id", None)
        .await
        .unwrap_err();

    assert!(matches!(err, SqlError::Execution(ref msg) if msg.contains("@id")));
}

#[tokio::test]
async fn test_misspelled_parameter_is_execution_error() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(seed_database(&dir));

    // Bind names are case-sensitive, so @Id leaves @id without a value
    let err = service
        .execute_query(
            "SELECT * FROM orders WHERE id = @id",
            Some(&json!({"Id": 1})),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "execution");
    assert!(err.to_string().contains("@id has no value"));
}

#[tokio::test]
async fn test_extra_parameter_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(seed_database(&dir));

    let outcome = service
        .execute_query(
            "SELECT id FROM orders WHERE id = @id",
            Some(&json!({"id": 3, "unused": "x"})),
        )
        .await
        .unwrap();

    assert_eq!(outcome.rows()[0].get("id"), Some(&SqlValue::Integer(3)));
}

#[tokio::test]
async fn test_numeric_column_keeps_large_integers() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_database(&dir);
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE ledger (amount NUMERIC, fee DECIMAL(10,2));
             INSERT INTO ledger (amount, fee) VALUES (9007199254740993, 2);",
        )
        .unwrap();
    }
    let service = service(path);

    let outcome = service
        .execute_query("SELECT amount, fee FROM ledger", None)
        .await
        .unwrap();

    let row = &outcome.rows()[0];
    assert_eq!(row.get("amount"), Some(&SqlValue::Integer(9_007_199_254_740_993)));
    assert_eq!(row.get("fee"), Some(&SqlValue::Float(2.0)));
    assert_eq!(
        serde_json::to_string(row).unwrap(),
        r#"{"amount":9007199254740993,"fee":2.0}"#
    );
}

#[tokio::test]
async fn test_non_integer_primary_key_is_nullable() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_database(&dir);
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE codes (code TEXT PRIMARY KEY, label TEXT NOT NULL);
             CREATE TABLE pairs (a INTEGER, b INTEGER NOT NULL, PRIMARY KEY (a, b));",
        )
        .unwrap();
    }
    let service = service(path);

    let codes = service.table_schema("codes").await.unwrap();
    assert!(codes.columns[0].nullable);
    assert!(!codes.columns[1].nullable);

    // Only a sole INTEGER PRIMARY KEY is a rowid alias
    let pairs = service.table_schema("pairs").await.unwrap();
    assert!(pairs.columns[0].nullable);
    assert!(!pairs.columns[1].nullable);

    let customers = service.table_schema("Customers").await.unwrap();
    assert!(!customers.columns[0].nullable);
}
