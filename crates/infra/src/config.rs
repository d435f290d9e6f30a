//! Database configuration loaded from the environment.
//!
//! Variables are read and validated up front so misconfiguration fails at
//! startup rather than at first query.

use std::env;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings for the backing Postgres database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Load from `DATABASE_URL` (required) and `DB_MAX_CONNECTIONS`
    /// (optional, defaults to 5).
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                value: raw.clone(),
            })?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };
        Ok(Self {
            url,
            max_connections,
        })
    }

    /// Open a connection pool against the configured database.
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.url)
            .await
    }
}
