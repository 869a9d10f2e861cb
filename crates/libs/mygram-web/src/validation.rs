//! Input validation shared by the resource services.
//!
//! Rules are checked all at once and every violation is reported, so a
//! client fixing a form sees all of its mistakes in one response.

use std::sync::LazyLock;

use regex::Regex;

use crate::prelude::*;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Youngest age allowed to sign up.
pub const MIN_SIGNUP_AGE: i32 = 8;

/// Request payloads checked before reaching the database.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Collects failed rules.
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` unless `ok` holds.
    pub fn check(&mut self, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.0.push(String::from(message));
        }
        self
    }

    pub fn require(&mut self, value: &str, field: &str) -> &mut Self {
        let ok = !value.trim().is_empty();
        if !ok {
            self.0.push(format!("{field} is required"));
        }
        self
    }

    /// `Ok` when no rule failed, otherwise every recorded violation.
    pub fn finish(&mut self) -> Result<()> {
        if self.0.is_empty() {
            return Ok(());
        }
        Err(Error::Validation(std::mem::take(&mut self.0)))
    }
}

/// Whether `email` looks like an address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX
        .as_ref()
        .is_some_and(|regex| regex.is_match(email))
}

/// Rejects the zero id before any lookup.
pub fn valid_id(id: i64, field: &str) -> Result<i64> {
    if id <= 0 {
        return Err(Error::invalid(format!("{field} must be a positive id")));
    }
    Ok(id)
}
