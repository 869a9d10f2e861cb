use std::error::Error;

use common::{db_test_context::DBTestContext, register};
use mygram_web::{
    error::Error as ApiError,
    photo::{self, PhotoFilter, PhotoInput},
    user,
};
use serial_test::serial;

mod common;

fn input(title: &str) -> PhotoInput {
    PhotoInput {
        title: String::from(title),
        caption: String::from("at the beach"),
        photo_url: String::from("https://img.mygram.dev/1.jpg"),
    }
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
fn test_only_owner_updates_photo() -> Result<(), Box<dyn Error>> {
    let db = DBTestContext::from_env();
    let (ana, _) = register(&db, "ana")?;
    let (bo, _) = register(&db, "bo")?;

    let created = photo::create(ana.id, input("sunset"), &db.connection)?;
    assert_eq!(created.user_id, ana.id);

    assert!(matches!(
        photo::update(created.id, bo.id, input("stolen"), &db.connection),
        Err(ApiError::ApiForbidden)
    ));
    let updated = photo::update(created.id, ana.id, input("new"), &db.connection)?;
    assert_eq!(updated.title, "new");
    assert_eq!(updated.user_id, ana.id);
    Ok(())
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
fn test_only_owner_deletes_photo() -> Result<(), Box<dyn Error>> {
    let db = DBTestContext::from_env();
    let (ana, _) = register(&db, "ana")?;
    let (bo, _) = register(&db, "bo")?;
    let created = photo::create(ana.id, input("sunset"), &db.connection)?;

    assert!(matches!(
        photo::delete(created.id, bo.id, &db.connection),
        Err(ApiError::ApiForbidden)
    ));
    let deleted = photo::delete(created.id, ana.id, &db.connection)?;
    assert_eq!(deleted.photo.id, created.id);

    assert!(matches!(
        photo::get(created.id, &db.connection),
        Err(ApiError::NotFound(_))
    ));
    assert!(photo::list(&PhotoFilter::default(), &db.connection)?.is_empty());
    assert!(matches!(
        photo::delete(created.id, ana.id, &db.connection),
        Err(ApiError::NotFound(_))
    ));
    Ok(())
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
fn test_missing_photo_is_not_found() -> Result<(), Box<dyn Error>> {
    let db = DBTestContext::from_env();
    let (ana, _) = register(&db, "ana")?;

    assert!(matches!(
        photo::update(9999, ana.id, input("x"), &db.connection),
        Err(ApiError::NotFound(_))
    ));
    Ok(())
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
fn test_list_attaches_owner_and_filters() -> Result<(), Box<dyn Error>> {
    let db = DBTestContext::from_env();
    let (ana, _) = register(&db, "ana")?;
    let (bo, _) = register(&db, "bo")?;
    photo::create(ana.id, input("one"), &db.connection)?;
    photo::create(bo.id, input("two"), &db.connection)?;
    photo::create(ana.id, input("three"), &db.connection)?;

    let all = photo::list(&PhotoFilter::default(), &db.connection)?;
    assert_eq!(all.len(), 3);
    for photo in &all {
        let owner = photo.user.as_ref().expect("owner attached");
        assert_eq!(owner.id, photo.user_id);
    }

    let filter = PhotoFilter {
        user_id: Some(ana.id),
    };
    let titles: Vec<_> = photo::list(&filter, &db.connection)?
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["one", "three"]);
    Ok(())
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
fn test_deleted_user_cannot_post_or_edit() -> Result<(), Box<dyn Error>> {
    let db = DBTestContext::from_env();
    let (ana, ctx) = register(&db, "ana")?;
    let created = photo::create(ana.id, input("sunset"), &db.connection)?;
    user::delete(ana.id, &ctx, &db.connection)?;

    assert!(matches!(
        photo::create(ctx.user_id(), input("ghost"), &db.connection),
        Err(ApiError::AccountDeleted)
    ));
    assert!(matches!(
        photo::update(created.id, ana.id, input("ghost"), &db.connection),
        Err(ApiError::AccountDeleted)
    ));
    assert!(matches!(
        photo::delete(created.id, ana.id, &db.connection),
        Err(ApiError::AccountDeleted)
    ));
    assert_eq!(photo::list(&PhotoFilter::default(), &db.connection)?.len(), 1);
    Ok(())
}
