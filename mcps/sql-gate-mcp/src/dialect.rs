//! SQL text per database family
//!
//! Both dialects project introspection results onto the column names of the
//! ANSI `INFORMATION_SCHEMA` views, so the introspector reads them the same
//! way regardless of the database behind the connector.

/// Bind parameter name used by the column introspection query
pub const TABLE_NAME_PARAM: &str = "TableName";

/// Bind parameter name used by the filtered table listing query
pub const SCHEMA_NAME_PARAM: &str = "SchemaName";

const SQLSERVER_COLUMNS: &str = "\
SELECT
    TABLE_SCHEMA,
    COLUMN_NAME,
    DATA_TYPE,
    IS_NULLABLE,
    CHARACTER_MAXIMUM_LENGTH,
    NUMERIC_PRECISION,
    NUMERIC_SCALE,
    COLUMN_DEFAULT
FROM INFORMATION_SCHEMA.COLUMNS
WHERE TABLE_NAME = @TableName
ORDER BY TABLE_SCHEMA, ORDINAL_POSITION";

const SQLITE_COLUMNS: &str = "\
SELECT
    'main' AS TABLE_SCHEMA,
    p.name AS COLUMN_NAME,
    p.type AS DATA_TYPE,
    CASE WHEN p.\"notnull\" = 0 AND NOT (
            p.pk = 1
            AND upper(p.type) = 'INTEGER'
            AND (SELECT COUNT(*) FROM pragma_table_info(@TableName) WHERE pk > 0) = 1
        ) THEN 'YES' ELSE 'NO' END AS IS_NULLABLE,
    NULL AS CHARACTER_MAXIMUM_LENGTH,
    NULL AS NUMERIC_PRECISION,
    NULL AS NUMERIC_SCALE,
    p.dflt_value AS COLUMN_DEFAULT
FROM pragma_table_info(@TableName) AS p
ORDER BY p.cid";

/// Database family the SQL text is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    SqlServer,
    Sqlite,
}

impl Dialect {
    /// Schema tables live in when none is named
    pub fn default_schema(self) -> &'static str {
        match self {
            Dialect::SqlServer => "dbo",
            Dialect::Sqlite => "main",
        }
    }

    /// Prefix that turns a parameter name into a bind name
    pub fn bind_marker(self) -> char {
        '@'
    }

    pub fn bind_name(self, name: &str) -> String {
        format!("{}{}", self.bind_marker(), name)
    }

    /// Quote an identifier, doubling any closing delimiter it contains
    pub fn quote_ident(self, ident: &str) -> String {
        match self {
            Dialect::SqlServer => format!("[{}]", ident.replace(']', "]]")),
            Dialect::Sqlite => format!("\"{}\"", ident.replace('"', "\"\"")),
        }
    }

    /// Query returning at most `limit` rows of `schema.table`
    pub fn sample_query(self, schema: &str, table: &str, limit: usize) -> String {
        let target = format!("{}.{}", self.quote_ident(schema), self.quote_ident(table));
        match self {
            Dialect::SqlServer => format!("SELECT TOP {} * FROM {}", limit, target),
            Dialect::Sqlite => format!("SELECT * FROM {} LIMIT {}", target, limit),
        }
    }

    /// Column metadata for `@TableName`, in ordinal order
    pub fn columns_query(self) -> &'static str {
        match self {
            Dialect::SqlServer => SQLSERVER_COLUMNS,
            Dialect::Sqlite => SQLITE_COLUMNS,
        }
    }

    /// Base tables ordered by schema then name, optionally restricted to
    /// `@SchemaName`
    pub fn tables_query(self, filter_schema: bool) -> String {
        let mut query = match self {
            Dialect::SqlServer => "SELECT TABLE_SCHEMA, TABLE_NAME, TABLE_TYPE \
                 FROM INFORMATION_SCHEMA.TABLES \
                 WHERE TABLE_TYPE = 'BASE TABLE'"
                .to_string(),
            Dialect::Sqlite => "SELECT 'main' AS TABLE_SCHEMA, name AS TABLE_NAME, \
                 'BASE TABLE' AS TABLE_TYPE \
                 FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\'"
                .to_string(),
        };

        if filter_schema {
            let column = match self {
                Dialect::SqlServer => "TABLE_SCHEMA",
                Dialect::Sqlite => "'main'",
            };
            query.push_str(&format!(" AND {} = @{}", column, SCHEMA_NAME_PARAM));
        }

        query.push_str(" ORDER BY TABLE_SCHEMA, TABLE_NAME");
        query
    }
}
