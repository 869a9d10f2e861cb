//! Photos posted by users.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;

use crate::batch::BatchLoad;
use crate::db::connection::DbConnection;
use crate::ownership::{Guarded, as_live_user, guarded};
use crate::prelude::*;
use crate::schema::photos::dsl::*;

/// A photo owned by `user_id`.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::photos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Photo {
    pub id: i64,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    /// The user that posted this photo.
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data for posting a photo.
#[derive(Insertable, PartialEq, Debug, Clone, Deserialize)]
#[diesel(table_name = crate::schema::photos)]
pub struct PhotoCreate {
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: i64,
}

/// Editable photo fields. The owner is not one of them.
#[derive(AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::photos)]
pub struct PhotoUpdate {
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub updated_at: DateTime<Utc>,
}

impl PhotoCreate {
    /// Saves the photo while its owner is live.
    pub fn save(self, connection: &DbConnection) -> Result<Guarded<Photo>> {
        as_live_user(connection, self.user_id, |conn| {
            diesel::insert_into(photos)
                .values(&self)
                .returning(Photo::as_returning())
                .get_result(conn)
                .map(Guarded::Applied)
        })
    }
}

impl Photo {
    pub fn fetch_all(connection: &DbConnection) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(Photo::live()
            .order(id.asc())
            .select(Photo::as_select())
            .load(conn)?)
    }

    pub fn fetch_by_id(target: i64, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(Photo::by_id(target)
            .select(Photo::as_select())
            .first(conn)
            .optional()?)
    }

    pub fn fetch_by_owner(owner: i64, connection: &DbConnection) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(Photo::live()
            .filter(user_id.eq(owner))
            .order(id.asc())
            .select(Photo::as_select())
            .load(conn)?)
    }

    /// Whether a live photo with id `target` exists.
    pub fn exists(target: i64, conn: &mut PgConnection) -> QueryResult<bool> {
        diesel::select(diesel::dsl::exists(Photo::by_id(target))).get_result(conn)
    }

    /// Takes a share lock on the live photo `target`, blocking a concurrent
    /// delete until the surrounding transaction ends.
    ///
    /// Returns `false` when no live photo has that id, including one whose
    /// delete committed while this call waited for the lock.
    pub fn lock_live(target: i64, conn: &mut PgConnection) -> QueryResult<bool> {
        Photo::by_id(target)
            .select(id)
            .for_share()
            .first::<i64>(conn)
            .optional()
            .map(|row| row.is_some())
    }

    /// Applies `changes` if `caller` owns the photo.
    pub fn update_owned(
        target: i64,
        caller: i64,
        changes: &PhotoUpdate,
        connection: &DbConnection,
    ) -> Result<Guarded<Self>> {
        guarded(
            connection,
            caller,
            |conn| {
                diesel::update(Photo::owned(target, caller))
                    .set(changes)
                    .returning(Photo::as_returning())
                    .get_result(conn)
                    .optional()
            },
            |conn| Photo::exists(target, conn),
        )
    }

    /// Soft deletes the photo if `caller` owns it.
    pub fn soft_delete_owned(
        target: i64,
        caller: i64,
        connection: &DbConnection,
    ) -> Result<Guarded<Self>> {
        guarded(
            connection,
            caller,
            |conn| {
                diesel::update(Photo::owned(target, caller))
                    .set(deleted_at.eq(Some(Utc::now())))
                    .returning(Photo::as_returning())
                    .get_result(conn)
                    .optional()
            },
            |conn| Photo::exists(target, conn),
        )
    }
}

impl Photo {
    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn live() -> _ {
        crate::schema::photos::dsl::photos.filter(deleted_at.is_null())
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: i64) -> _ {
        crate::schema::photos::dsl::photos
            .filter(deleted_at.is_null())
            .filter(id.eq(target))
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn owned(target: i64, owner: i64) -> _ {
        crate::schema::photos::dsl::photos
            .filter(deleted_at.is_null())
            .filter(id.eq(target))
            .filter(user_id.eq(owner))
    }
}

impl BatchLoad for Photo {
    fn key(&self) -> i64 {
        self.id
    }

    fn fetch_many(ids: &[i64], connection: &DbConnection) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(Photo::live()
            .filter(id.eq_any(ids))
            .select(Photo::as_select())
            .load(conn)?)
    }
}
