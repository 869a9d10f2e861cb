//! Comments on photos.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;

use crate::db::connection::DbConnection;
use crate::ownership::{Guarded, as_live_user, guarded};
use crate::photo::Photo;
use crate::prelude::*;
use crate::schema::comments::dsl::*;

/// A comment left by `user_id` on `photo_id`.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    pub id: i64,
    pub message: String,
    pub user_id: i64,
    pub photo_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data for commenting on a photo.
#[derive(Insertable, PartialEq, Debug, Clone, Deserialize)]
#[diesel(table_name = crate::schema::comments)]
pub struct CommentCreate {
    pub message: String,
    pub user_id: i64,
    pub photo_id: i64,
}

/// Editable comment fields.
#[derive(AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::comments)]
pub struct CommentUpdate {
    pub message: String,
    pub updated_at: DateTime<Utc>,
}

impl CommentCreate {
    /// Saves the comment if its author and photo are live.
    ///
    /// The photo row stays share locked until the insert commits, so a
    /// concurrent photo delete either finishes first and yields
    /// [`Guarded::Missing`], or waits for the comment.
    pub fn save(self, connection: &DbConnection) -> Result<Guarded<Comment>> {
        as_live_user(connection, self.user_id, |conn| {
            if !Photo::lock_live(self.photo_id, conn)? {
                return Ok(Guarded::Missing);
            }
            diesel::insert_into(comments)
                .values(&self)
                .returning(Comment::as_returning())
                .get_result(conn)
                .map(Guarded::Applied)
        })
    }
}

impl Comment {
    pub fn fetch_all(connection: &DbConnection) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(Comment::live()
            .order(id.asc())
            .select(Comment::as_select())
            .load(conn)?)
    }

    pub fn fetch_by_id(target: i64, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(Comment::by_id(target)
            .select(Comment::as_select())
            .first(conn)
            .optional()?)
    }

    pub fn fetch_by_photo(photo: i64, connection: &DbConnection) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(Comment::live()
            .filter(photo_id.eq(photo))
            .order(id.asc())
            .select(Comment::as_select())
            .load(conn)?)
    }

    pub fn exists(target: i64, conn: &mut PgConnection) -> QueryResult<bool> {
        diesel::select(diesel::dsl::exists(Comment::by_id(target))).get_result(conn)
    }

    /// Applies `changes` if `caller` wrote the comment.
    pub fn update_owned(
        target: i64,
        caller: i64,
        changes: &CommentUpdate,
        connection: &DbConnection,
    ) -> Result<Guarded<Self>> {
        guarded(
            connection,
            caller,
            |conn| {
                diesel::update(Comment::owned(target, caller))
                    .set(changes)
                    .returning(Comment::as_returning())
                    .get_result(conn)
                    .optional()
            },
            |conn| Comment::exists(target, conn),
        )
    }

    /// Soft deletes the comment if `caller` wrote it.
    pub fn soft_delete_owned(
        target: i64,
        caller: i64,
        connection: &DbConnection,
    ) -> Result<Guarded<Self>> {
        guarded(
            connection,
            caller,
            |conn| {
                diesel::update(Comment::owned(target, caller))
                    .set(deleted_at.eq(Some(Utc::now())))
                    .returning(Comment::as_returning())
                    .get_result(conn)
                    .optional()
            },
            |conn| Comment::exists(target, conn),
        )
    }
}

impl Comment {
    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn live() -> _ {
        crate::schema::comments::dsl::comments.filter(deleted_at.is_null())
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: i64) -> _ {
        crate::schema::comments::dsl::comments
            .filter(deleted_at.is_null())
            .filter(id.eq(target))
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn owned(target: i64, owner: i64) -> _ {
        crate::schema::comments::dsl::comments
            .filter(deleted_at.is_null())
            .filter(id.eq(target))
            .filter(user_id.eq(owner))
    }
}
