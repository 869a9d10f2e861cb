//! Context resolver extracting the caller from HTTP requests.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use mygram_auth::{
    AUTH_HEADER, CONNECTION_TOKEN_TYPE, auth_body::AuthBody, claims::AccessClaim, jwt::JwtKeys,
};
use tower_cookies::{Cookie, Cookies};
use tracing::debug;

use crate::ctx::Ctx;
use crate::prelude::*;

/// The name of the cookie used to store authentication tokens.
pub const AUTH_TOKEN_COOKIE: &str = "auth-token";

/// Bearer token of a request. The `Authorization` header wins over the
/// cookie.
pub fn request_token(headers: &HeaderMap, cookies: &Cookies) -> Option<String> {
    headers
        .get(AUTH_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_credentials)
        .map(String::from)
        .or_else(|| cookies.get(AUTH_TOKEN_COOKIE).map(|c| c.value().to_string()))
}

/// Credentials of a `Bearer` authorization value. The scheme name is
/// matched case-insensitively.
fn bearer_credentials(value: &str) -> Option<&str> {
    let (scheme, credentials) = value.trim_start().split_once(' ')?;
    let credentials = credentials.trim();
    (scheme.eq_ignore_ascii_case(CONNECTION_TOKEN_TYPE) && !credentials.is_empty())
        .then_some(credentials)
}

/// Middleware resolving the request context from the bearer token.
///
/// Verifies the token against `keys` and stores the outcome in the
/// request extensions, successful or not. Rejecting the request is left
/// to [`crate::mw_auth::mw_require_auth`].
///
/// ```rust
/// use std::sync::Arc;
/// use axum::Router;
/// use mygram_auth::jwt::JwtKeys;
/// use mygram_web::ctx::resolver::mw_ctx_resolver;
///
/// let keys = Arc::new(JwtKeys::new(b"secret"));
/// let app: Router<()> = Router::new()
///     .layer(axum::middleware::from_fn_with_state(keys, mw_ctx_resolver));
/// ```
pub async fn mw_ctx_resolver(
    State(keys): State<Arc<JwtKeys>>,
    cookies: Cookies,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let ctx = request_token(&headers, &cookies)
        .ok_or(mygram_auth::error::Error::TokenMissing)
        .and_then(|token| AccessClaim::verify(&token, &keys))
        .map(Ctx::from);

    if let Err(err) = &ctx {
        debug!("Request without valid context: {err}");
        if cookies.get(AUTH_TOKEN_COOKIE).is_some() {
            let mut stale = Cookie::from(AUTH_TOKEN_COOKIE);
            stale.set_path("/");
            cookies.remove(stale);
        }
    }
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

/// Stores a freshly issued access token in the auth cookie.
pub fn login_user(auth: AuthBody, cookies: &Cookies) -> AuthBody {
    let mut cookie = Cookie::new(AUTH_TOKEN_COOKIE, auth.access_token.clone());
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookies.add(cookie);
    auth
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<std::result::Result<Ctx, mygram_auth::error::Error>>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_scheme_ignores_case() {
        assert_eq!(bearer_credentials("Bearer abc"), Some("abc"));
        assert_eq!(bearer_credentials("bearer abc"), Some("abc"));
        assert_eq!(bearer_credentials("BEARER  abc "), Some("abc"));
    }

    #[test]
    fn other_schemes_yield_nothing() {
        assert_eq!(bearer_credentials("Basic YW5hOnNlY3JldA=="), None);
        assert_eq!(bearer_credentials("Bearer"), None);
        assert_eq!(bearer_credentials("Bearer   "), None);
        assert_eq!(bearer_credentials("Bearerabc"), None);
    }
}
