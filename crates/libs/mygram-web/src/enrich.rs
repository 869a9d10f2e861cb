//! Display data attached to listed resources.
//!
//! Photos, comments and social media entries are shown with a summary
//! of their owner, comments also with a summary of their photo. The
//! related rows are loaded with one [`BatchLoad`] query per table and
//! merged through a lookup table.

use std::collections::HashMap;

use mygram_models::{batch::BatchLoad, db::connection::DbConnection, photo::Photo, user::User};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Public fields of a resource owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Public fields of the photo a comment belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSummary {
    pub id: i64,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: i64,
}

impl From<User> for OwnerSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

impl From<Photo> for PhotoSummary {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            title: photo.title,
            caption: photo.caption,
            photo_url: photo.photo_url,
            user_id: photo.user_id,
        }
    }
}

/// Loads the records referenced by `items` and converts them to `S`.
pub fn lookup<T, R, S, K>(
    items: &[T],
    key: K,
    connection: &DbConnection,
) -> Result<HashMap<i64, S>>
where
    R: BatchLoad,
    S: From<R>,
    K: Fn(&T) -> i64,
{
    Ok(R::load_many(items.iter().map(key), connection)?
        .into_iter()
        .map(|(id, record)| (id, S::from(record)))
        .collect())
}

/// Pairs every item with its entry in `table`. Items whose reference is
/// missing or soft deleted get `None`.
pub fn attach<T, S: Clone>(
    items: Vec<T>,
    table: &HashMap<i64, S>,
    key: impl Fn(&T) -> i64,
) -> Vec<(T, Option<S>)> {
    items
        .into_iter()
        .map(|item| {
            let found = table.get(&key(&item)).cloned();
            (item, found)
        })
        .collect()
}

/// Owner summaries for `items`.
pub fn owners<T, K>(
    items: &[T],
    owner_of: K,
    connection: &DbConnection,
) -> Result<HashMap<i64, OwnerSummary>>
where
    K: Fn(&T) -> i64,
{
    lookup::<T, User, OwnerSummary, K>(items, owner_of, connection)
}

/// Photo summaries for `items`.
pub fn photos<T, K>(
    items: &[T],
    photo_of: K,
    connection: &DbConnection,
) -> Result<HashMap<i64, PhotoSummary>>
where
    K: Fn(&T) -> i64,
{
    lookup::<T, Photo, PhotoSummary, K>(items, photo_of, connection)
}
