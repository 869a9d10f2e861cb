use std::error::Error;
use std::thread;
use std::time::Duration;

use common::{db_test_context::DBTestContext, from_env, register};
use diesel::{Connection, PgConnection, connection::SimpleConnection};
use mygram_web::{
    comment::{self, CommentEdit, CommentFilter, CommentInput},
    error::Error as ApiError,
    photo::{self, PhotoInput},
};
use serial_test::serial;

mod common;

fn post_photo(db: &DBTestContext, owner: i64) -> Result<i64, Box<dyn Error>> {
    let input = PhotoInput {
        title: String::from("sunset"),
        caption: String::new(),
        photo_url: String::from("https://img.mygram.dev/1.jpg"),
    };
    Ok(photo::create(owner, input, &db.connection)?.id)
}

fn say(message: &str, photo_id: i64) -> CommentInput {
    CommentInput {
        message: String::from(message),
        photo_id,
    }
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
fn test_comment_on_missing_photo() -> Result<(), Box<dyn Error>> {
    let db = DBTestContext::from_env();
    let (ana, _) = register(&db, "ana")?;

    assert!(matches!(
        comment::create(ana.id, say("hello", 9999), &db.connection),
        Err(ApiError::NotFound("photo"))
    ));
    Ok(())
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
fn test_first_comment_on_photo() -> Result<(), Box<dyn Error>> {
    let db = DBTestContext::from_env();
    let (ana, _) = register(&db, "ana")?;
    let (bo, _) = register(&db, "bo")?;
    let photo_id = post_photo(&db, ana.id)?;

    let created = comment::create(bo.id, say("nice", photo_id), &db.connection)?;
    assert_eq!(created.user_id, bo.id);

    let fetched = comment::get(created.id, &db.connection)?;
    assert_eq!(fetched.user.map(|u| u.username), Some(String::from("bo")));
    assert_eq!(fetched.photo.map(|p| p.user_id), Some(ana.id));
    Ok(())
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
fn test_comment_on_deleted_photo() -> Result<(), Box<dyn Error>> {
    let db = DBTestContext::from_env();
    let (ana, _) = register(&db, "ana")?;
    let photo_id = post_photo(&db, ana.id)?;
    photo::delete(photo_id, ana.id, &db.connection)?;

    assert!(matches!(
        comment::create(ana.id, say("gone", photo_id), &db.connection),
        Err(ApiError::NotFound("photo"))
    ));
    Ok(())
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
fn test_only_author_edits_comment() -> Result<(), Box<dyn Error>> {
    let db = DBTestContext::from_env();
    let (ana, _) = register(&db, "ana")?;
    let (bo, _) = register(&db, "bo")?;
    let photo_id = post_photo(&db, ana.id)?;
    let created = comment::create(bo.id, say("nice", photo_id), &db.connection)?;

    let edit = CommentEdit {
        message: String::from("edited"),
    };
    assert!(matches!(
        comment::update(created.id, ana.id, edit.clone(), &db.connection),
        Err(ApiError::ApiForbidden)
    ));
    assert!(matches!(
        comment::delete(created.id, ana.id, &db.connection),
        Err(ApiError::ApiForbidden)
    ));
    assert_eq!(
        comment::update(created.id, bo.id, edit, &db.connection)?.message,
        "edited"
    );
    comment::delete(created.id, bo.id, &db.connection)?;

    let filter = CommentFilter {
        photo_id: Some(photo_id),
    };
    assert!(comment::list(&filter, &db.connection)?.is_empty());
    Ok(())
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
fn test_comment_waits_for_concurrent_photo_delete() -> Result<(), Box<dyn Error>> {
    let db = DBTestContext::from_env();
    let (ana, _) = register(&db, "ana")?;
    let (bo, _) = register(&db, "bo")?;
    let photo_id = post_photo(&db, ana.id)?;

    let mut deleter = PgConnection::establish(&from_env("DATABASE_URL"))?;
    deleter.batch_execute(&format!(
        "BEGIN; UPDATE photos SET deleted_at = NOW() WHERE id = {photo_id}"
    ))?;

    let connection = db.connection.clone();
    let author = bo.id;
    let pending =
        thread::spawn(move || comment::create(author, say("too late", photo_id), &connection));
    thread::sleep(Duration::from_millis(300));
    deleter.batch_execute("COMMIT")?;

    let outcome = pending.join().expect("comment thread panicked");
    assert!(matches!(outcome, Err(ApiError::NotFound("photo"))));

    let filter = CommentFilter {
        photo_id: Some(photo_id),
    };
    assert!(comment::list(&filter, &db.connection)?.is_empty());
    Ok(())
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
fn test_deleted_author_cannot_comment() -> Result<(), Box<dyn Error>> {
    let db = DBTestContext::from_env();
    let (ana, _) = register(&db, "ana")?;
    let (bo, bo_ctx) = register(&db, "bo")?;
    let photo_id = post_photo(&db, ana.id)?;
    let created = comment::create(bo.id, say("nice", photo_id), &db.connection)?;
    mygram_web::user::delete(bo.id, &bo_ctx, &db.connection)?;

    assert!(matches!(
        comment::create(bo.id, say("still here", photo_id), &db.connection),
        Err(ApiError::AccountDeleted)
    ));
    let edit = CommentEdit {
        message: String::from("edited"),
    };
    assert!(matches!(
        comment::update(created.id, bo.id, edit, &db.connection),
        Err(ApiError::AccountDeleted)
    ));
    Ok(())
}
