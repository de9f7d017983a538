//! Configuration for the SQL gate MCP server

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// SQL gate configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SqlConfig {
    /// Database connection settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Schema and table visibility
    #[serde(default)]
    pub access: AccessConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file (`~` expands to the home directory)
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Open the database read-only
    /// Default: true
    #[serde(default = "default_read_only")]
    pub read_only: bool,

    /// Busy timeout in seconds
    /// Default: 30
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_path() -> PathBuf {
    PathBuf::from("database.db")
}

fn default_read_only() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            read_only: default_read_only(),
            timeout_secs: default_timeout(),
        }
    }
}

impl DatabaseConfig {
    /// Database path with a leading `~` resolved
    pub fn resolved_path(&self) -> PathBuf {
        let Some(text) = self.path.to_str() else {
            return self.path.clone();
        };
        if let Some(rest) = text.strip_prefix('~') {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest.trim_start_matches('/'));
            }
        }
        self.path.clone()
    }
}

/// Allow-lists applied to table listing, description and sampling
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfig {
    /// Schemas that may be exposed. Unset means the dialect's default schema
    /// only; an empty list means any schema.
    #[serde(default)]
    pub allowed_schemas: Option<Vec<String>>,

    /// Tables that may be exposed. Empty means any table.
    #[serde(default)]
    pub allowed_tables: Vec<String>,
}

impl SqlConfig {
    /// Load configuration from file
    ///
    /// Looks for config in:
    /// 1. `SQL_GATE_CONFIG_PATH` environment variable
    /// 2. `~/.binks/sql-gate.toml`
    pub fn load() -> Result<Self> {
        let config_path = if let Ok(path) = std::env::var("SQL_GATE_CONFIG_PATH") {
            PathBuf::from(path)
        } else {
            dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".binks")
                .join("sql-gate.toml")
        };

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {:?}", config_path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config from {:?}", config_path))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Create a config pointing to a specific database, with default access
    pub fn with_database(path: PathBuf) -> Self {
        Self {
            database: DatabaseConfig {
                path,
                ..DatabaseConfig::default()
            },
            access: AccessConfig::default(),
        }
    }
}
