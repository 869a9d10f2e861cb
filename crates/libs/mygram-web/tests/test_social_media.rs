use std::error::Error;

use common::{db_test_context::DBTestContext, register};
use mygram_web::{
    error::Error as ApiError,
    social_media::{self, SocialMediaFilter, SocialMediaInput},
};
use serial_test::serial;

mod common;

fn input(name: &str) -> SocialMediaInput {
    SocialMediaInput {
        name: String::from(name),
        social_media_url: format!("https://social.example/{name}"),
    }
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
fn test_only_owner_changes_social_media() -> Result<(), Box<dyn Error>> {
    let db = DBTestContext::from_env();
    let (ana, _) = register(&db, "ana")?;
    let (bo, _) = register(&db, "bo")?;
    let created = social_media::create(ana.id, input("ana"), &db.connection)?;

    assert!(matches!(
        social_media::update(created.id, bo.id, input("bo"), &db.connection),
        Err(ApiError::ApiForbidden)
    ));
    assert!(matches!(
        social_media::delete(created.id, bo.id, &db.connection),
        Err(ApiError::ApiForbidden)
    ));

    let updated = social_media::update(created.id, ana.id, input("ana2"), &db.connection)?;
    assert_eq!(updated.name, "ana2");
    social_media::delete(created.id, ana.id, &db.connection)?;

    let filter = SocialMediaFilter {
        user_id: Some(ana.id),
    };
    assert!(social_media::list(&filter, &db.connection)?.is_empty());
    assert!(matches!(
        social_media::get(created.id, &db.connection),
        Err(ApiError::NotFound(_))
    ));
    Ok(())
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
fn test_deleted_owner_is_omitted() -> Result<(), Box<dyn Error>> {
    let db = DBTestContext::from_env();
    let (ana, ctx) = register(&db, "ana")?;
    let created = social_media::create(ana.id, input("ana"), &db.connection)?;
    mygram_web::user::delete(ana.id, &ctx, &db.connection)?;

    let fetched = social_media::get(created.id, &db.connection)?;
    assert!(fetched.user.is_none());
    Ok(())
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
fn test_deleted_owner_cannot_add_social_media() -> Result<(), Box<dyn Error>> {
    let db = DBTestContext::from_env();
    let (ana, ctx) = register(&db, "ana")?;
    let created = social_media::create(ana.id, input("ana"), &db.connection)?;
    mygram_web::user::delete(ana.id, &ctx, &db.connection)?;

    assert!(matches!(
        social_media::create(ana.id, input("again"), &db.connection),
        Err(ApiError::AccountDeleted)
    ));
    assert!(matches!(
        social_media::delete(created.id, ana.id, &db.connection),
        Err(ApiError::AccountDeleted)
    ));
    Ok(())
}
