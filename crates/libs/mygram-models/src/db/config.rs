//! Database configuration management.

use std::fmt::Display;

use crate::prelude::*;

/// Database connection configuration.
pub struct DbConfig {
    /// PostgreSQL database URL.
    pub database_url: String,
}

impl DbConfig {
    /// Create database configuration from the `DATABASE_URL` environment
    /// variable.
    ///
    /// ```rust,no_run
    /// use mygram_models::db::config::DbConfig;
    ///
    /// let config = DbConfig::from_env().unwrap();
    /// ```
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| Error::MissingEnv("DATABASE_URL"))?,
        })
    }
}
impl Display for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "REDACTED")
    }
}
