//! Authentication primitives for the MyGram API.
//!
//! - [`secret_hash`]: argon2 password hashing and verification.
//! - [`claims`]: the claim set embedded in every token.
//! - [`jwt`]: signing and verification with an injected key pair.

pub mod auth_body;
pub mod claims;
pub mod error;
pub mod jwt;
pub mod prelude;
pub mod secret_hash;

pub const CONNECTION_TOKEN_TYPE: &str = "Bearer";
pub const AUTH_HEADER: &str = "Authorization";

/// Issuer written into and required from every token.
pub const ISS: &str = "mygram";
/// Audience written into and required from every token.
pub const AUD: &str = "mygram-api";
