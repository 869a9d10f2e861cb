//! User service: sign up, sign in and profile management.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use mygram_auth::{auth_body::AuthBody, jwt::JwtKeys, secret_hash::generate_secret_hash};
use mygram_models::{
    db::connection::DbConnection,
    user::{User, UserCreate, UserUpdate, age_on},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth_token::{check_credentials, issue_access_token};
use crate::ctx::Ctx;
use crate::ownership::ensure_self;
use crate::prelude::*;
use crate::validation::{
    MIN_PASSWORD_LEN, MIN_SIGNUP_AGE, Validate, Violations, is_valid_email, valid_id,
};

const WHAT: &str = "user";
const TAKEN: &str = "Username or email is already registered";

/// A user as returned by the API. The password hash never leaves the
/// server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserApi {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub dob: NaiveDate,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sign up form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSignup {
    pub username: String,
    pub email: String,
    pub password: String,
    pub dob: NaiveDate,
}

/// Sign in form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

/// Profile update form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEdit {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserDeleted {
    pub message: String,
    pub user: UserApi,
}

impl UserSignup {
    /// Checks the form as of `today`.
    pub fn validate_on(&self, today: NaiveDate) -> Result<()> {
        Violations::new()
            .require(&self.username, "username")
            .require(&self.email, "email")
            .check(
                self.email.trim().is_empty() || is_valid_email(&self.email),
                "email is not a valid address",
            )
            .check(
                self.password.chars().count() >= MIN_PASSWORD_LEN,
                "password must be at least 6 characters",
            )
            .check(
                age_on(self.dob, today) >= MIN_SIGNUP_AGE,
                "age must be at least 8 years old",
            )
            .finish()
    }
}

impl Validate for UserSignup {
    fn validate(&self) -> Result<()> {
        self.validate_on(Utc::now().date_naive())
    }
}

impl Validate for UserEdit {
    fn validate(&self) -> Result<()> {
        Violations::new()
            .require(&self.username, "username")
            .require(&self.email, "email")
            .check(
                self.email.trim().is_empty() || is_valid_email(&self.email),
                "email is not a valid address",
            )
            .finish()
    }
}

impl From<User> for UserApi {
    fn from(user: User) -> Self {
        let age = user.age_on(Utc::now().date_naive());
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            dob: user.dob,
            age,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Storage errors of user writes, with duplicate usernames and emails
/// reported as a conflict.
fn taken(err: mygram_models::error::Error) -> Error {
    if err.is_unique_violation() {
        return Error::Conflict(TAKEN);
    }
    Error::Models(err)
}

/// Registers a new user.
pub fn register(input: UserSignup, connection: &DbConnection) -> Result<UserApi> {
    input.validate()?;
    let password = generate_secret_hash(&input.password)?;
    let user = UserCreate {
        username: input.username,
        email: input.email,
        password,
        dob: input.dob,
    }
    .save(connection)
    .map_err(taken)?;
    info!("Registered user {} ({})", user.id, user.username);
    Ok(UserApi::from(user))
}

/// Signs a user in and issues an access token valid for `lifetime`.
pub fn login(
    input: &UserLogin,
    keys: &JwtKeys,
    lifetime: TimeDelta,
    connection: &DbConnection,
) -> Result<AuthBody> {
    let user = check_credentials(&input.email, &input.password, connection)?;
    info!("User {} signed in", user.id);
    issue_access_token(&user, keys, lifetime)
}

pub fn list(connection: &DbConnection) -> Result<Vec<UserApi>> {
    Ok(User::fetch_all(connection)?
        .into_iter()
        .map(UserApi::from)
        .collect())
}

pub fn get(id: i64, connection: &DbConnection) -> Result<UserApi> {
    let user = User::fetch_by_id(valid_id(id, "id")?, connection)?.ok_or(Error::NotFound(WHAT))?;
    Ok(UserApi::from(user))
}

/// Updates the caller's own profile.
pub fn update(id: i64, ctx: &Ctx, input: UserEdit, connection: &DbConnection) -> Result<UserApi> {
    let id = valid_id(id, "id")?;
    ensure_self(ctx, id)?;
    input.validate()?;
    let changes = UserUpdate {
        username: input.username,
        email: input.email,
        updated_at: Utc::now(),
    };
    let user = User::update(id, &changes, connection)
        .map_err(taken)?
        .ok_or(Error::NotFound(WHAT))?;
    Ok(UserApi::from(user))
}

/// Deletes the caller's own account.
pub fn delete(id: i64, ctx: &Ctx, connection: &DbConnection) -> Result<UserDeleted> {
    let id = valid_id(id, "id")?;
    ensure_self(ctx, id)?;
    let user = User::soft_delete(id, connection)?.ok_or(Error::NotFound(WHAT))?;
    info!("User {id} deleted their account");
    Ok(UserDeleted {
        message: String::from("Your account has been successfully deleted"),
        user: UserApi::from(user),
    })
}
