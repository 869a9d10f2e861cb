//! Owner-only mutations.
//!
//! Photos, comments and social media entries may only be changed by the
//! user that created them. Instead of fetching the row, comparing owners
//! and then writing, the write itself is conditional on the owner
//! (`WHERE id = ? AND user_id = ? AND deleted_at IS NULL`). When it
//! touches nothing, the same transaction tells a foreign row apart from a
//! missing one.
//!
//! Every write made on behalf of a user first takes a share lock on that
//! user's live row, so an account that was deleted after its token was
//! issued can no longer create or change anything, and a concurrent
//! account deletion waits for the write to finish.

use diesel::{Connection, PgConnection, QueryResult};

use crate::db::connection::DbConnection;
use crate::prelude::*;
use crate::user::User;

/// Result of a write made on behalf of a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// The write was applied.
    Applied(T),
    /// The row exists but belongs to someone else. Nothing was written.
    NotOwner,
    /// No live row has that id.
    Missing,
    /// The caller's own account is deleted. Nothing was written.
    CallerGone,
}

impl<T> Guarded<T> {
    /// Classifies a conditional write that matched nothing.
    pub fn miss(exists: bool) -> Self {
        if exists { Self::NotOwner } else { Self::Missing }
    }
}

/// Runs `write` in a transaction that holds a share lock on `caller`'s live
/// user row.
///
/// Returns [`Guarded::CallerGone`] without calling `write` when the caller
/// is deleted.
pub fn as_live_user<T, W>(connection: &DbConnection, caller: i64, write: W) -> Result<Guarded<T>>
where
    W: FnOnce(&mut PgConnection) -> QueryResult<Guarded<T>>,
{
    let mut pooled = connection.pool.get()?;
    let conn: &mut PgConnection = &mut pooled;

    Ok(conn.transaction::<_, diesel::result::Error, _>(|conn| {
        if !User::lock_live(caller, conn)? {
            return Ok(Guarded::CallerGone);
        }
        write(conn)
    })?)
}

/// Runs `mutate` and, if it matched no row, `exists`, as the live `caller`.
///
/// `mutate` must restrict its write to rows owned by the caller and return
/// the updated row, or `None` when nothing matched. `exists` reports
/// whether a live row with the target id exists regardless of owner.
pub fn guarded<T, M, E>(
    connection: &DbConnection,
    caller: i64,
    mutate: M,
    exists: E,
) -> Result<Guarded<T>>
where
    M: FnOnce(&mut PgConnection) -> QueryResult<Option<T>>,
    E: FnOnce(&mut PgConnection) -> QueryResult<bool>,
{
    as_live_user(connection, caller, |conn| {
        if let Some(row) = mutate(conn)? {
            return Ok(Guarded::Applied(row));
        }
        Ok(Guarded::miss(exists(conn)?))
    })
}
