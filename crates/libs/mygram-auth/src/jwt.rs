//! JWT signing and verification.
//!
//! [`JwtKeys`] is built once from the configured secret and shared with
//! every request through the application state.
//!
//! ```rust
//! use chrono::TimeDelta;
//! use mygram_auth::{claims::{StandardClaims, TokenKind}, jwt::JwtKeys};
//!
//! let keys = JwtKeys::new(b"MySuperSecret");
//! let claims = StandardClaims::new(TokenKind::Public, TimeDelta::hours(1)).unwrap();
//!
//! let token = keys.encode(&claims).unwrap();
//! let decoded: StandardClaims = keys.decode(&token).unwrap();
//! assert_eq!(claims, decoded);
//! ```

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{AUD, ISS, prelude::*};

/// JWT signing algorithm used for every token.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Key pair for signing and verifying tokens.
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtKeys {
    /// Creates a key pair from the raw signing secret.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_issuer(&[ISS]);
        validation.set_audience(&[AUD]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Signs `body` into a compact JWT.
    pub fn encode<T>(&self, body: &T) -> Result<String>
    where
        T: Serialize,
    {
        let header = Header::new(ALGORITHM);
        Ok(encode(&header, body, &self.encoding)?)
    }

    /// Verifies `token` and extracts its claims.
    ///
    /// Checks the signature, issuer and audience, and rejects tokens used
    /// after `exp` or before `nbf` with no leeway.
    pub fn decode<T>(&self, token: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        decode::<T>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => Error::TokenExpired,
                ErrorKind::ImmatureSignature => Error::TokenNotYetValid,
                _ => Error::InvalidToken,
            })
    }
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JwtKeys(REDACTED)")
    }
}
