//! Photo service.

use chrono::{DateTime, Utc};
use mygram_models::{
    db::connection::DbConnection,
    photo::{Photo, PhotoCreate, PhotoUpdate},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::enrich::{self, OwnerSummary};
use crate::ownership::GuardedExt;
use crate::prelude::*;
use crate::validation::{Validate, Violations, valid_id};

const WHAT: &str = "photo";

/// A photo as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoApi {
    pub id: i64,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<OwnerSummary>,
}

/// Body of photo create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoInput {
    pub title: String,
    #[serde(default)]
    pub caption: String,
    pub photo_url: String,
}

/// Response to a photo deletion.
#[derive(Debug, Serialize, Deserialize)]
pub struct PhotoDeleted {
    pub message: String,
    pub photo: PhotoApi,
}

/// Query string of the photo listing.
#[derive(Debug, Default, Deserialize)]
pub struct PhotoFilter {
    pub user_id: Option<i64>,
}

impl Validate for PhotoInput {
    fn validate(&self) -> Result<()> {
        Violations::new()
            .require(&self.title, "title")
            .require(&self.photo_url, "photo_url")
            .finish()
    }
}

impl From<Photo> for PhotoApi {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            title: photo.title,
            caption: photo.caption,
            photo_url: photo.photo_url,
            user_id: photo.user_id,
            created_at: photo.created_at,
            updated_at: photo.updated_at,
            user: None,
        }
    }
}

impl PhotoApi {
    fn with_owner(mut self, owner: Option<OwnerSummary>) -> Self {
        self.user = owner;
        self
    }
}

fn enriched(photos: Vec<Photo>, connection: &DbConnection) -> Result<Vec<PhotoApi>> {
    let owners = enrich::owners(&photos, |p| p.user_id, connection)?;
    Ok(enrich::attach(photos, &owners, |p| p.user_id)
        .into_iter()
        .map(|(photo, owner)| PhotoApi::from(photo).with_owner(owner))
        .collect())
}

/// Live photos, optionally only those of one user.
pub fn list(filter: &PhotoFilter, connection: &DbConnection) -> Result<Vec<PhotoApi>> {
    let photos = match filter.user_id {
        Some(owner) => Photo::fetch_by_owner(valid_id(owner, "user_id")?, connection)?,
        None => Photo::fetch_all(connection)?,
    };
    enriched(photos, connection)
}

pub fn get(id: i64, connection: &DbConnection) -> Result<PhotoApi> {
    let photo = Photo::fetch_by_id(valid_id(id, "id")?, connection)?
        .ok_or(Error::NotFound(WHAT))?;
    enriched(vec![photo], connection)?
        .pop()
        .ok_or(Error::NotFound(WHAT))
}

/// Posts a photo owned by `owner`.
pub fn create(owner: i64, input: PhotoInput, connection: &DbConnection) -> Result<PhotoApi> {
    input.validate()?;
    let photo = PhotoCreate {
        title: input.title,
        caption: input.caption,
        photo_url: input.photo_url,
        user_id: owner,
    }
    .save(connection)?
    .or_reject(WHAT)?;
    info!("User {owner} posted photo {}", photo.id);
    Ok(PhotoApi::from(photo))
}

/// Edits a photo of `caller`.
pub fn update(
    id: i64,
    caller: i64,
    input: PhotoInput,
    connection: &DbConnection,
) -> Result<PhotoApi> {
    let id = valid_id(id, "id")?;
    input.validate()?;
    let changes = PhotoUpdate {
        title: input.title,
        caption: input.caption,
        photo_url: input.photo_url,
        updated_at: Utc::now(),
    };
    let photo = Photo::update_owned(id, caller, &changes, connection)?.or_reject(WHAT)?;
    Ok(PhotoApi::from(photo))
}

/// Soft deletes a photo of `caller`.
pub fn delete(id: i64, caller: i64, connection: &DbConnection) -> Result<PhotoDeleted> {
    let id = valid_id(id, "id")?;
    let photo = Photo::soft_delete_owned(id, caller, connection)?.or_reject(WHAT)?;
    info!("User {caller} deleted photo {id}");
    Ok(PhotoDeleted {
        message: String::from("Your photo has been successfully deleted"),
        photo: PhotoApi::from(photo),
    })
}
