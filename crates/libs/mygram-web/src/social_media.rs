//! Social media service.

use chrono::{DateTime, Utc};
use mygram_models::{
    db::connection::DbConnection,
    social_media::{SocialMedia, SocialMediaCreate, SocialMediaUpdate},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::enrich::{self, OwnerSummary};
use crate::ownership::GuardedExt;
use crate::prelude::*;
use crate::validation::{Validate, Violations, valid_id};

const WHAT: &str = "social media";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialMediaApi {
    pub id: i64,
    pub name: String,
    pub social_media_url: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<OwnerSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialMediaInput {
    pub name: String,
    pub social_media_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SocialMediaDeleted {
    pub message: String,
    pub social_media: SocialMediaApi,
}

#[derive(Debug, Default, Deserialize)]
pub struct SocialMediaFilter {
    pub user_id: Option<i64>,
}

impl Validate for SocialMediaInput {
    fn validate(&self) -> Result<()> {
        Violations::new()
            .require(&self.name, "name")
            .require(&self.social_media_url, "social_media_url")
            .finish()
    }
}

impl From<SocialMedia> for SocialMediaApi {
    fn from(entry: SocialMedia) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            social_media_url: entry.social_media_url,
            user_id: entry.user_id,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
            user: None,
        }
    }
}

fn enriched(entries: Vec<SocialMedia>, connection: &DbConnection) -> Result<Vec<SocialMediaApi>> {
    let owners = enrich::owners(&entries, |s| s.user_id, connection)?;
    Ok(enrich::attach(entries, &owners, |s| s.user_id)
        .into_iter()
        .map(|(entry, user)| SocialMediaApi {
            user,
            ..SocialMediaApi::from(entry)
        })
        .collect())
}

pub fn list(filter: &SocialMediaFilter, connection: &DbConnection) -> Result<Vec<SocialMediaApi>> {
    let entries = match filter.user_id {
        Some(owner) => SocialMedia::fetch_by_owner(valid_id(owner, "user_id")?, connection)?,
        None => SocialMedia::fetch_all(connection)?,
    };
    enriched(entries, connection)
}

pub fn get(id: i64, connection: &DbConnection) -> Result<SocialMediaApi> {
    let entry = SocialMedia::fetch_by_id(valid_id(id, "id")?, connection)?
        .ok_or(Error::NotFound(WHAT))?;
    enriched(vec![entry], connection)?
        .pop()
        .ok_or(Error::NotFound(WHAT))
}

pub fn create(
    owner: i64,
    input: SocialMediaInput,
    connection: &DbConnection,
) -> Result<SocialMediaApi> {
    input.validate()?;
    let entry = SocialMediaCreate {
        name: input.name,
        social_media_url: input.social_media_url,
        user_id: owner,
    }
    .save(connection)?
    .or_reject(WHAT)?;
    info!("User {owner} added social media {}", entry.id);
    Ok(SocialMediaApi::from(entry))
}

pub fn update(
    id: i64,
    caller: i64,
    input: SocialMediaInput,
    connection: &DbConnection,
) -> Result<SocialMediaApi> {
    let id = valid_id(id, "id")?;
    input.validate()?;
    let changes = SocialMediaUpdate {
        name: input.name,
        social_media_url: input.social_media_url,
        updated_at: Utc::now(),
    };
    let entry = SocialMedia::update_owned(id, caller, &changes, connection)?.or_reject(WHAT)?;
    Ok(SocialMediaApi::from(entry))
}

pub fn delete(id: i64, caller: i64, connection: &DbConnection) -> Result<SocialMediaDeleted> {
    let id = valid_id(id, "id")?;
    let entry = SocialMedia::soft_delete_owned(id, caller, connection)?.or_reject(WHAT)?;
    info!("User {caller} deleted social media {id}");
    Ok(SocialMediaDeleted {
        message: String::from("Your social media has been successfully deleted"),
        social_media: SocialMediaApi::from(entry),
    })
}
