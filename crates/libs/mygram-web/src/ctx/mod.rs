//! Request context for authenticated web handlers.
//!
//! [`resolver::mw_ctx_resolver`] turns the bearer token of every request
//! into a `Result<Ctx>` stored in the request extensions. Handlers take
//! [`Ctx`] as an extractor and get rejected with 401 when it is missing.

use mygram_auth::claims::AccessClaim;

use crate::ctx::ctx_user::CtxUser;

pub mod ctx_user;
pub mod resolver;

/// Request context of a signed in user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctx {
    /// The caller, as recorded in the access token.
    pub user: CtxUser,
}

impl Ctx {
    /// ```rust
    /// use mygram_web::ctx::Ctx;
    ///
    /// let ctx = Ctx::new(7, String::from("ana"), 21);
    /// assert_eq!(ctx.user.id, 7);
    /// ```
    pub fn new(id: i64, username: String, age: i32) -> Self {
        Self {
            user: CtxUser { id, username, age },
        }
    }

    /// Id of the caller, the owner stamped on everything they create.
    pub fn user_id(&self) -> i64 {
        self.user.id
    }
}

impl From<AccessClaim> for Ctx {
    fn from(claim: AccessClaim) -> Self {
        Self::new(claim.user_id, claim.username, claim.age)
    }
}
