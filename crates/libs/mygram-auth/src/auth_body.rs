//! Sign in response.

use serde::{Deserialize, Serialize};

use super::CONNECTION_TOKEN_TYPE;

/// Access token handed to a user after a successful sign in.
///
/// ```json
/// {
///   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "token_type": "Bearer"
/// }
/// ```
#[derive(Debug, Deserialize, Serialize)]
pub struct AuthBody {
    pub access_token: String,
    /// Always "Bearer".
    pub token_type: String,
}
impl AuthBody {
    /// ```rust
    /// use mygram_auth::auth_body::AuthBody;
    ///
    /// let response = AuthBody::new("some_token".to_string());
    /// assert_eq!(response.token_type, "Bearer");
    /// ```
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            token_type: String::from(CONNECTION_TOKEN_TYPE),
        }
    }
}
