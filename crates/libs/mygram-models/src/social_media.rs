//! Social media links on a user profile.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;

use crate::db::connection::DbConnection;
use crate::ownership::{Guarded, as_live_user, guarded};
use crate::prelude::*;
use crate::schema::social_medias::dsl::*;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::social_medias)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SocialMedia {
    pub id: i64,
    pub name: String,
    pub social_media_url: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Insertable, PartialEq, Debug, Clone, Deserialize)]
#[diesel(table_name = crate::schema::social_medias)]
pub struct SocialMediaCreate {
    pub name: String,
    pub social_media_url: String,
    pub user_id: i64,
}

#[derive(AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::social_medias)]
pub struct SocialMediaUpdate {
    pub name: String,
    pub social_media_url: String,
    pub updated_at: DateTime<Utc>,
}

impl SocialMediaCreate {
    pub fn save(self, connection: &DbConnection) -> Result<Guarded<SocialMedia>> {
        as_live_user(connection, self.user_id, |conn| {
            diesel::insert_into(social_medias)
                .values(&self)
                .returning(SocialMedia::as_returning())
                .get_result(conn)
                .map(Guarded::Applied)
        })
    }
}

impl SocialMedia {
    pub fn fetch_all(connection: &DbConnection) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(SocialMedia::live()
            .order(id.asc())
            .select(SocialMedia::as_select())
            .load(conn)?)
    }

    pub fn fetch_by_id(target: i64, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(SocialMedia::by_id(target)
            .select(SocialMedia::as_select())
            .first(conn)
            .optional()?)
    }

    pub fn fetch_by_owner(owner: i64, connection: &DbConnection) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(SocialMedia::live()
            .filter(user_id.eq(owner))
            .order(id.asc())
            .select(SocialMedia::as_select())
            .load(conn)?)
    }

    pub fn exists(target: i64, conn: &mut PgConnection) -> QueryResult<bool> {
        diesel::select(diesel::dsl::exists(SocialMedia::by_id(target))).get_result(conn)
    }

    pub fn update_owned(
        target: i64,
        caller: i64,
        changes: &SocialMediaUpdate,
        connection: &DbConnection,
    ) -> Result<Guarded<Self>> {
        guarded(
            connection,
            caller,
            |conn| {
                diesel::update(SocialMedia::owned(target, caller))
                    .set(changes)
                    .returning(SocialMedia::as_returning())
                    .get_result(conn)
                    .optional()
            },
            |conn| SocialMedia::exists(target, conn),
        )
    }

    pub fn soft_delete_owned(
        target: i64,
        caller: i64,
        connection: &DbConnection,
    ) -> Result<Guarded<Self>> {
        guarded(
            connection,
            caller,
            |conn| {
                diesel::update(SocialMedia::owned(target, caller))
                    .set(deleted_at.eq(Some(Utc::now())))
                    .returning(SocialMedia::as_returning())
                    .get_result(conn)
                    .optional()
            },
            |conn| SocialMedia::exists(target, conn),
        )
    }
}

impl SocialMedia {
    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn live() -> _ {
        crate::schema::social_medias::dsl::social_medias.filter(deleted_at.is_null())
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: i64) -> _ {
        crate::schema::social_medias::dsl::social_medias
            .filter(deleted_at.is_null())
            .filter(id.eq(target))
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn owned(target: i64, owner: i64) -> _ {
        crate::schema::social_medias::dsl::social_medias
            .filter(deleted_at.is_null())
            .filter(id.eq(target))
            .filter(user_id.eq(owner))
    }
}
