//! Web layer of the MyGram API.
//!
//! Request context and authentication middleware, the JSON error
//! envelope, input validation and the user, photo, comment and social
//! media services the HTTP handlers call into.

pub mod auth_token;
pub mod comment;
pub mod ctx;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod mw_auth;
pub mod ownership;
pub mod photo;
pub mod prelude;
pub mod social_media;
pub mod user;
pub mod validation;
