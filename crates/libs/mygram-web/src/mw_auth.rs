//! Authentication middleware for protecting routes.

use crate::prelude::*;
use axum::{extract::Request, middleware::Next, response::Response};

use super::ctx::Ctx;

/// Middleware that requires a signed in user.
///
/// Requests whose context did not resolve are rejected with the token
/// error that caused it, which renders as 401.
///
/// ```rust,no_run
/// use axum::{Router, routing::get};
/// use mygram_web::mw_auth::mw_require_auth;
///
/// let app: Router<()> = Router::new()
///     .route("/photos", get(list_photos))
///     .layer(axum::middleware::from_fn(mw_require_auth));
///
/// async fn list_photos() -> &'static str {
///     "[]"
/// }
/// ```
pub async fn mw_require_auth(ctx: Result<Ctx>, req: Request, next: Next) -> Result<Response> {
    ctx?;
    Ok(next.run(req).await)
}
