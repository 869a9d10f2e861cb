//! Registered users.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use diesel::prelude::*;
use serde::Deserialize;

use crate::batch::BatchLoad;
use crate::db::connection::DbConnection;
use crate::prelude::*;
use crate::schema::users::dsl::*;

/// A MyGram user. `password` holds the Argon2 hash.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub dob: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data for registering a user.
#[derive(Insertable, PartialEq, Debug, Clone, Deserialize)]
#[diesel(table_name = crate::schema::users)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    /// Already hashed password.
    pub password: String,
    pub dob: NaiveDate,
}

/// Profile fields a user may change.
#[derive(AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct UserUpdate {
    pub username: String,
    pub email: String,
    pub updated_at: DateTime<Utc>,
}

impl UserCreate {
    /// Saves the user to the database.
    pub fn save(self, connection: &DbConnection) -> Result<User> {
        let conn = &mut connection.pool.get()?;
        Ok(diesel::insert_into(users)
            .values(&self)
            .returning(User::as_returning())
            .get_result(conn)?)
    }
}

impl User {
    pub fn fetch_all(connection: &DbConnection) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(User::live()
            .order(id.asc())
            .select(User::as_select())
            .load(conn)?)
    }

    pub fn fetch_by_id(target: i64, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(User::by_id(target)
            .select(User::as_select())
            .first(conn)
            .optional()?)
    }

    pub fn fetch_by_email(target: &str, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(User::by_email(target)
            .select(User::as_select())
            .first(conn)
            .optional()?)
    }

    /// Takes a share lock on the live user `target`.
    ///
    /// Returns `false` when no live user has that id. Must run inside a
    /// transaction, the lock is held until it ends.
    pub fn lock_live(target: i64, conn: &mut PgConnection) -> QueryResult<bool> {
        User::by_id(target)
            .select(id)
            .for_share()
            .first::<i64>(conn)
            .optional()
            .map(|row| row.is_some())
    }

    /// Applies `changes` to a live user.
    pub fn update(
        target: i64,
        changes: &UserUpdate,
        connection: &DbConnection,
    ) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(diesel::update(User::by_id(target))
            .set(changes)
            .returning(User::as_returning())
            .get_result(conn)
            .optional()?)
    }

    /// Marks a live user as deleted.
    pub fn soft_delete(target: i64, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(diesel::update(User::by_id(target))
            .set(deleted_at.eq(Some(Utc::now())))
            .returning(User::as_returning())
            .get_result(conn)
            .optional()?)
    }

    /// Age in whole years on `today`.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_on(self.dob, today)
    }
}

impl User {
    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn live() -> _ {
        crate::schema::users::dsl::users.filter(deleted_at.is_null())
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: i64) -> _ {
        crate::schema::users::dsl::users
            .filter(deleted_at.is_null())
            .filter(id.eq(target))
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_email(target: &str) -> _ {
        crate::schema::users::dsl::users
            .filter(deleted_at.is_null())
            .filter(email.eq(target))
    }
}

impl BatchLoad for User {
    fn key(&self) -> i64 {
        self.id
    }

    fn fetch_many(ids: &[i64], connection: &DbConnection) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(User::live()
            .filter(id.eq_any(ids))
            .select(User::as_select())
            .load(conn)?)
    }
}

/// Whole years between `birth` and `today`, counting a year only once
/// its anniversary has passed.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_counts_completed_years() {
        assert_eq!(age_on(date(2000, 6, 15), date(2024, 6, 14)), 23);
        assert_eq!(age_on(date(2000, 6, 15), date(2024, 6, 15)), 24);
        assert_eq!(age_on(date(2000, 6, 15), date(2024, 12, 1)), 24);
    }

    #[test]
    fn age_of_newborn_is_zero() {
        assert_eq!(age_on(date(2024, 1, 1), date(2024, 1, 1)), 0);
        assert_eq!(age_on(date(2023, 3, 1), date(2024, 2, 29)), 0);
    }
}
