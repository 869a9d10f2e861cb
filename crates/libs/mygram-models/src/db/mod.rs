//! Database configuration and connection pool.

pub mod config;
pub mod connection;
