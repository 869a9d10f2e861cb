//! Comment service.

use chrono::{DateTime, Utc};
use mygram_models::{
    comment::{Comment, CommentCreate, CommentUpdate},
    db::connection::DbConnection,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::enrich::{self, OwnerSummary, PhotoSummary};
use crate::ownership::GuardedExt;
use crate::prelude::*;
use crate::validation::{Validate, Violations, valid_id};

const WHAT: &str = "comment";

/// A comment as returned by the API, with its author and photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentApi {
    pub id: i64,
    pub message: String,
    pub photo_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<OwnerSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<PhotoSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentInput {
    pub message: String,
    pub photo_id: i64,
}

/// Body of comment updates. A comment cannot move to another photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEdit {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentDeleted {
    pub message: String,
    pub comment: CommentApi,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentFilter {
    pub photo_id: Option<i64>,
}

impl Validate for CommentInput {
    fn validate(&self) -> Result<()> {
        Violations::new()
            .require(&self.message, "message")
            .check(self.photo_id > 0, "photo_id is required")
            .finish()
    }
}

impl Validate for CommentEdit {
    fn validate(&self) -> Result<()> {
        Violations::new().require(&self.message, "message").finish()
    }
}

impl From<Comment> for CommentApi {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            message: comment.message,
            photo_id: comment.photo_id,
            user_id: comment.user_id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            user: None,
            photo: None,
        }
    }
}

fn enriched(comments: Vec<Comment>, connection: &DbConnection) -> Result<Vec<CommentApi>> {
    let owners = enrich::owners(&comments, |c| c.user_id, connection)?;
    let photos = enrich::photos(&comments, |c| c.photo_id, connection)?;
    Ok(enrich::attach(comments, &owners, |c| c.user_id)
        .into_iter()
        .map(|(comment, owner)| {
            let photo = photos.get(&comment.photo_id).cloned();
            CommentApi {
                user: owner,
                photo,
                ..CommentApi::from(comment)
            }
        })
        .collect())
}

/// Live comments, optionally only those on one photo.
pub fn list(filter: &CommentFilter, connection: &DbConnection) -> Result<Vec<CommentApi>> {
    let comments = match filter.photo_id {
        Some(photo) => Comment::fetch_by_photo(valid_id(photo, "photo_id")?, connection)?,
        None => Comment::fetch_all(connection)?,
    };
    enriched(comments, connection)
}

pub fn get(id: i64, connection: &DbConnection) -> Result<CommentApi> {
    let comment = Comment::fetch_by_id(valid_id(id, "id")?, connection)?
        .ok_or(Error::NotFound(WHAT))?;
    enriched(vec![comment], connection)?
        .pop()
        .ok_or(Error::NotFound(WHAT))
}

/// Comments on a live photo as `owner`.
pub fn create(owner: i64, input: CommentInput, connection: &DbConnection) -> Result<CommentApi> {
    input.validate()?;
    let comment = CommentCreate {
        message: input.message,
        user_id: owner,
        photo_id: input.photo_id,
    }
    .save(connection)?
    .or_reject("photo")?;
    info!("User {owner} commented on photo {}", comment.photo_id);
    Ok(CommentApi::from(comment))
}

/// Edits a comment written by `caller`.
pub fn update(
    id: i64,
    caller: i64,
    input: CommentEdit,
    connection: &DbConnection,
) -> Result<CommentApi> {
    let id = valid_id(id, "id")?;
    input.validate()?;
    let changes = CommentUpdate {
        message: input.message,
        updated_at: Utc::now(),
    };
    let comment = Comment::update_owned(id, caller, &changes, connection)?.or_reject(WHAT)?;
    Ok(CommentApi::from(comment))
}

/// Soft deletes a comment written by `caller`.
pub fn delete(id: i64, caller: i64, connection: &DbConnection) -> Result<CommentDeleted> {
    let id = valid_id(id, "id")?;
    let comment = Comment::soft_delete_owned(id, caller, connection)?.or_reject(WHAT)?;
    info!("User {caller} deleted comment {id}");
    Ok(CommentDeleted {
        message: String::from("Your comment has been successfully deleted"),
        comment: CommentApi::from(comment),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_photo_id_is_rejected_with_empty_message() {
        let input = CommentInput {
            message: String::new(),
            photo_id: 0,
        };
        match input.validate() {
            Err(Error::Validation(errors)) => {
                assert_eq!(errors, vec!["message is required", "photo_id is required"])
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn edit_needs_a_message() {
        assert!(
            CommentEdit {
                message: String::from("nice")
            }
            .validate()
            .is_ok()
        );
        assert!(
            CommentEdit {
                message: String::from(" ")
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn edit_ignores_photo_id() {
        let edit: CommentEdit =
            serde_json::from_str(r#"{"message":"hi","photo_id":3}"#).unwrap();
        assert_eq!(edit.message, "hi");
    }
}
