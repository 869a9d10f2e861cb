//! Service configuration read from the environment.

use std::net::SocketAddr;

use chrono::TimeDelta;
use mygram_models::db::config::DbConfig;

use crate::prelude::*;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

/// Settings of a running `mygramd`.
pub struct ServerConfig {
    pub db: DbConfig,
    /// Secret signing every token.
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    /// Lifetime of access tokens issued on sign in.
    pub token_ttl: TimeDelta,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(Error::MissingEnv(name))
        };

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let bind_addr =
            lookup("MYGRAM_BIND_ADDR").unwrap_or_else(|| String::from(DEFAULT_BIND_ADDR));
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|_| Error::InvalidEnv {
                name: "MYGRAM_BIND_ADDR",
                value: bind_addr.clone(),
            })?;

        let token_ttl = match lookup("MYGRAM_TOKEN_TTL_MINUTES") {
            None => DEFAULT_TOKEN_TTL_MINUTES,
            Some(value) => value
                .parse::<i64>()
                .ok()
                .filter(|minutes| *minutes > 0)
                .ok_or(Error::InvalidEnv {
                    name: "MYGRAM_TOKEN_TTL_MINUTES",
                    value,
                })?,
        };

        Ok(Self {
            db: DbConfig { database_url },
            jwt_secret,
            bind_addr,
            token_ttl: TimeDelta::minutes(token_ttl),
        })
    }
}
