//! Query gate - admissibility checks for queries and tables
//!
//! The keyword check is a raw, case-insensitive substring match. It does not
//! understand token boundaries, comments or string literals, so identifiers
//! such as `my_CREATE_log` are refused along with real DDL.

use std::collections::HashSet;

use crate::config::AccessConfig;
use crate::dialect::Dialect;

/// Keywords that make a query inadmissible, matched anywhere in the text
pub const FORBIDDEN_KEYWORDS: [&str; 8] = [
    "INSERT", "UPDATE", "DELETE", "DROP", "CREATE", "ALTER", "EXEC", "EXECUTE",
];

/// Schema and table allow-lists, fixed at startup
///
/// An empty set places no restriction on that dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    allowed_schemas: HashSet<String>,
    allowed_tables: HashSet<String>,
}

impl AccessPolicy {
    pub fn new<S, T>(schemas: S, tables: T) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            allowed_schemas: schemas.into_iter().map(Into::into).collect(),
            allowed_tables: tables.into_iter().map(Into::into).collect(),
        }
    }

    /// Only the dialect's default schema, any table in it
    pub fn for_dialect(dialect: Dialect) -> Self {
        Self::new([dialect.default_schema()], Vec::<String>::new())
    }

    /// Build the policy from config, falling back to the dialect's default
    /// schema when no schema list is configured
    pub fn from_config(access: &AccessConfig, dialect: Dialect) -> Self {
        let schemas = match &access.allowed_schemas {
            Some(schemas) => schemas.clone(),
            None => vec![dialect.default_schema().to_string()],
        };
        Self::new(schemas, access.allowed_tables.clone())
    }

    pub fn allowed_schemas(&self) -> &HashSet<String> {
        &self.allowed_schemas
    }

    pub fn allowed_tables(&self) -> &HashSet<String> {
        &self.allowed_tables
    }
}

/// Pure admissibility checks over an [`AccessPolicy`]
#[derive(Debug, Clone)]
pub struct QueryGate {
    policy: AccessPolicy,
}

impl QueryGate {
    pub fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Check a raw query against the forbidden keyword list
    ///
    /// The table allow-list is not consulted here; it only governs the
    /// introspection and sampling paths.
    pub fn is_query_allowed(&self, query: &str) -> bool {
        let upper = query.to_uppercase();
        !FORBIDDEN_KEYWORDS.iter().any(|kw| upper.contains(kw))
    }

    /// Check a table/schema pair against the allow-lists
    pub fn is_table_allowed(&self, table: &str, schema: &str) -> bool {
        if !self.policy.allowed_schemas.is_empty() && !self.policy.allowed_schemas.contains(schema)
        {
            return false;
        }

        if !self.policy.allowed_tables.is_empty() && !self.policy.allowed_tables.contains(table) {
            return false;
        }

        true
    }
}
