//! Database models and ORM layer for the MyGram API.
//!
//! Diesel models, queries and connection management for users, photos,
//! comments and social media entries. Every read filters out soft-deleted
//! rows and every mutation of an owned record goes through
//! [`ownership::guarded`].
//!
//! ```rust,no_run
//! use mygram_models::{db::{config::DbConfig, connection::DbConnection}, user::User};
//!
//! let config = DbConfig::from_env().unwrap();
//! let conn = DbConnection::new(&config).unwrap().setup().unwrap();
//!
//! let users = User::fetch_all(&conn).unwrap();
//! println!("Found {} users", users.len());
//! ```

pub mod batch;
pub mod comment;
pub mod db;
pub mod error;
pub mod ownership;
pub mod photo;
pub mod prelude;
mod schema;
pub mod social_media;
pub mod user;
