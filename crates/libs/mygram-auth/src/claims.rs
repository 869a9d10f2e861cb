//! Claim set carried by MyGram tokens.
//!
//! Every token carries the registered claims in [`StandardClaims`]. The
//! `sub` claim holds the token purpose, a [`TokenKind`]. Access tokens
//! additionally carry the identity of the logged in user, see
//! [`AccessClaim`].

use chrono::{TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{AUD, ISS, jwt::JwtKeys, prelude::*};

/// Purpose of a token, serialized into the `sub` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Anonymous token handed out by the public endpoint.
    #[serde(rename = "public-token")]
    Public,
    /// Token issued to a user on sign in.
    #[serde(rename = "access-token")]
    Access,
}

/// Registered JWT claims shared by every MyGram token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardClaims {
    /// Unique token id, the issue instant in nanoseconds.
    pub jti: String,
    pub iss: String,
    pub aud: String,
    pub sub: TokenKind,
    /// Expiration time (Unix seconds).
    pub exp: i64,
    /// Issued at (Unix seconds).
    pub iat: i64,
    /// Not before (Unix seconds).
    pub nbf: i64,
}

impl StandardClaims {
    /// Creates claims valid from now until `now + lifetime`.
    ///
    /// Fails with [`Error::InvalidLifetime`] when the lifetime is not
    /// positive or overflows the calendar.
    pub fn new(sub: TokenKind, lifetime: TimeDelta) -> Result<Self> {
        if lifetime <= TimeDelta::zero() {
            return Err(Error::InvalidLifetime);
        }
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(lifetime)
            .ok_or(Error::InvalidLifetime)?;

        Ok(Self {
            jti: now.timestamp_nanos_opt().unwrap_or_default().to_string(),
            iss: String::from(ISS),
            aud: String::from(AUD),
            sub,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
        })
    }
}

/// Claims of an access token: the standard claims plus the identity of
/// the user it was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaim {
    #[serde(flatten)]
    pub standard: StandardClaims,
    pub user_id: i64,
    pub username: String,
    /// Age in years derived from the user's date of birth.
    pub age: i32,
}

impl AccessClaim {
    pub fn new(user_id: i64, username: String, age: i32, lifetime: TimeDelta) -> Result<Self> {
        Ok(Self {
            standard: StandardClaims::new(TokenKind::Access, lifetime)?,
            user_id,
            username,
            age,
        })
    }

    /// Verifies `token` and requires it to be an access token.
    ///
    /// Public tokens share the signing key, so a valid public token fails
    /// here with [`Error::WrongTokenKind`]. The standard claims are only
    /// decoded on their own when the full claim set does not decode.
    pub fn verify(token: &str, keys: &JwtKeys) -> Result<Self> {
        match keys.decode::<Self>(token) {
            Ok(claim) if claim.standard.sub == TokenKind::Access => Ok(claim),
            Ok(_) => Err(Error::WrongTokenKind),
            Err(Error::InvalidToken) => match keys.decode::<StandardClaims>(token) {
                Ok(standard) if standard.sub != TokenKind::Access => Err(Error::WrongTokenKind),
                _ => Err(Error::InvalidToken),
            },
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_to_subject_strings() {
        assert_eq!(
            serde_json::to_string(&TokenKind::Public).unwrap(),
            "\"public-token\""
        );
        assert_eq!(
            serde_json::to_string(&TokenKind::Access).unwrap(),
            "\"access-token\""
        );
    }

    #[test]
    fn access_claim_is_flat() {
        let claim = AccessClaim::new(7, String::from("alice"), 30, TimeDelta::hours(1)).unwrap();
        let value = serde_json::to_value(&claim).unwrap();
        assert_eq!(value["sub"], "access-token");
        assert_eq!(value["iss"], ISS);
        assert_eq!(value["aud"], AUD);
        assert_eq!(value["user_id"], 7);
        assert_eq!(value["username"], "alice");
        assert_eq!(value["age"], 30);
        assert!(value.get("standard").is_none());
    }

    #[test]
    fn validity_window() {
        let claims = StandardClaims::new(TokenKind::Public, TimeDelta::hours(1)).unwrap();
        assert_eq!(claims.iat, claims.nbf);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn non_positive_lifetime_is_rejected() {
        assert!(matches!(
            StandardClaims::new(TokenKind::Access, TimeDelta::zero()),
            Err(Error::InvalidLifetime)
        ));
        assert!(matches!(
            StandardClaims::new(TokenKind::Access, TimeDelta::minutes(-5)),
            Err(Error::InvalidLifetime)
        ));
    }
}
