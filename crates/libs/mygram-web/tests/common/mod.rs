#![allow(dead_code)]

use chrono::NaiveDate;
use mygram_web::{
    ctx::Ctx,
    user::{self, UserApi, UserSignup},
};

pub mod db_test_context;

pub fn from_env(var: &str) -> String {
    std::env::var(var).expect(&format!("Env Variable '{}' missing", var))
}

pub fn signup(name: &str) -> UserSignup {
    UserSignup {
        username: String::from(name),
        email: format!("{name}@mygram.dev"),
        password: String::from("secret1"),
        dob: NaiveDate::from_ymd_opt(1995, 4, 12).unwrap(),
    }
}

/// Registers `name` and returns the user with a matching request context.
pub fn register(
    db: &db_test_context::DBTestContext,
    name: &str,
) -> Result<(UserApi, Ctx), Box<dyn std::error::Error>> {
    let user = user::register(signup(name), &db.connection)?;
    let ctx = Ctx::new(user.id, user.username.clone(), user.age);
    Ok((user, ctx))
}
