//! Identity of the user behind a request.

use serde::{Deserialize, Serialize};

/// Caller identity carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtxUser {
    pub id: i64,
    pub username: String,
    pub age: i32,
}

impl CtxUser {
    /// Whether this caller is the user with id `target`.
    pub fn is(&self, target: i64) -> bool {
        self.id == target
    }
}
