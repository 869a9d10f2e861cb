//! Password hashing and verification using Argon2.
//!
//! Hashes are stored as PHC strings, so the salt and the algorithm
//! parameters travel with the hash and verification needs nothing else.
//!
//! ```rust
//! use mygram_auth::secret_hash::{generate_secret_hash, is_secret_valid};
//!
//! let hash = generate_secret_hash("secret1").unwrap();
//! assert!(is_secret_valid("secret1", &hash).unwrap());
//! assert!(!is_secret_valid("wrong", &hash).unwrap());
//! ```

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{self, PasswordHashString, SaltString},
};
use rand::rngs::OsRng;

use crate::prelude::*;

/// Longest password accepted for hashing, in bytes.
pub const MAX_SECRET_LEN: usize = 128;

/// Generates a salted Argon2 hash for `pw`.
///
/// Fails with [`Error::PasswordTooLong`] when `pw` is longer than
/// [`MAX_SECRET_LEN`] bytes.
pub fn generate_secret_hash(pw: &str) -> Result<String> {
    if pw.len() > MAX_SECRET_LEN {
        return Err(Error::PasswordTooLong(MAX_SECRET_LEN));
    }
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2.hash_password(pw.as_bytes(), &salt)?.to_string())
}

/// Verifies `pw` against a stored hash.
///
/// * `Ok(true)` - password matches
/// * `Ok(false)` - password does not match
/// * `Err(Error::PasswordHash)` - the stored hash could not be parsed
pub fn is_secret_valid(pw: &str, hash: &str) -> Result<bool> {
    let hash = PasswordHashString::new(hash)?;

    Ok(Argon2::default()
        .verify_password(pw.as_bytes(), &hash.password_hash())
        .is_ok())
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}
