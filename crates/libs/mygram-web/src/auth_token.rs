//! Token issuing and credential checks for sign in.

use std::sync::LazyLock;

use chrono::{TimeDelta, Utc};
use mygram_auth::{
    auth_body::AuthBody,
    claims::{AccessClaim, StandardClaims, TokenKind},
    jwt::JwtKeys,
    secret_hash::{generate_secret_hash, is_secret_valid},
};
use mygram_models::{db::connection::DbConnection, user::User};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::prelude::*;

/// Lifetime of tokens handed out by the public endpoint.
pub const PUBLIC_TOKEN_LIFETIME: TimeDelta = TimeDelta::hours(1);

/// Hash verified when the email is unknown, so an unknown email costs
/// as much as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| generate_secret_hash("mygram-dummy-password").ok());

/// Response of the public token endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicToken {
    pub token: String,
}

/// Issues an access token identifying `user`.
pub fn issue_access_token(user: &User, keys: &JwtKeys, lifetime: TimeDelta) -> Result<AuthBody> {
    let age = user.age_on(Utc::now().date_naive());
    let claims = AccessClaim::new(user.id, user.username.clone(), age, lifetime)?;
    let token = keys.encode(&claims).map_err(|err| {
        error!("Failed to encode JWT {err}");
        Error::AuthTokenCreation
    })?;
    Ok(AuthBody::new(token))
}

/// Issues an anonymous token. It is not accepted by protected routes.
pub fn issue_public_token(keys: &JwtKeys) -> Result<PublicToken> {
    let claims = StandardClaims::new(TokenKind::Public, PUBLIC_TOKEN_LIFETIME)?;
    let token = keys.encode(&claims).map_err(|err| {
        error!("Failed to encode JWT {err}");
        Error::AuthTokenCreation
    })?;
    Ok(PublicToken { token })
}

/// Finds the live user registered with `email` and checks `password`
/// against their hash.
///
/// An unknown email and a wrong password fail alike with
/// [`Error::WrongCredentials`].
pub fn check_credentials(email: &str, password: &str, connection: &DbConnection) -> Result<User> {
    if email.is_empty() || password.is_empty() {
        return Err(Error::MissingCredentials);
    }

    let Some(user) = User::fetch_by_email(email, connection)? else {
        if let Some(dummy) = DUMMY_HASH.as_deref() {
            let _ = is_secret_valid(password, dummy);
        }
        return Err(Error::WrongCredentials);
    };

    if !is_secret_valid(password, &user.password)? {
        return Err(Error::WrongCredentials);
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mygram_auth::error::Error as AuthError;

    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: 4,
            username: String::from("ana"),
            email: String::from("a@b.com"),
            password: String::new(),
            dob: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn access_token_identifies_the_user() {
        let keys = JwtKeys::new(b"test-secret");
        let body = issue_access_token(&user(), &keys, TimeDelta::hours(1)).unwrap();
        assert_eq!(body.token_type, "Bearer");

        let claim = AccessClaim::verify(&body.access_token, &keys).unwrap();
        assert_eq!(claim.user_id, 4);
        assert_eq!(claim.username, "ana");
        assert!(claim.age >= 24);
    }

    #[test]
    fn public_token_is_not_an_access_token() {
        let keys = JwtKeys::new(b"test-secret");
        let public = issue_public_token(&keys).unwrap();
        assert!(matches!(
            AccessClaim::verify(&public.token, &keys),
            Err(AuthError::WrongTokenKind)
        ));
    }

    #[test]
    fn non_positive_lifetime_is_rejected() {
        let keys = JwtKeys::new(b"test-secret");
        assert!(matches!(
            issue_access_token(&user(), &keys, TimeDelta::zero()),
            Err(Error::Auth(AuthError::InvalidLifetime))
        ));
    }

    #[test]
    fn dummy_hash_is_available() {
        assert!(DUMMY_HASH.is_some());
    }
}
