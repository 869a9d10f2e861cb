//! Turning owner-only mutation outcomes into API errors.

use mygram_models::ownership::Guarded;

use crate::ctx::Ctx;
use crate::prelude::*;

/// Maps a [`Guarded`] outcome to the value, `401`, `403` or `404`.
pub trait GuardedExt<T> {
    fn or_reject(self, what: &'static str) -> Result<T>;
}

impl<T> GuardedExt<T> for Guarded<T> {
    fn or_reject(self, what: &'static str) -> Result<T> {
        match self {
            Guarded::Applied(value) => Ok(value),
            Guarded::NotOwner => Err(Error::ApiForbidden),
            Guarded::Missing => Err(Error::NotFound(what)),
            Guarded::CallerGone => Err(Error::AccountDeleted),
        }
    }
}

/// Users may only change their own profile.
pub fn ensure_self(ctx: &Ctx, target: i64) -> Result<()> {
    if !ctx.user.is(target) {
        return Err(Error::ApiForbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applied_yields_the_row() {
        assert_eq!(Guarded::Applied(5).or_reject("photo").unwrap(), 5);
    }

    #[test]
    fn foreign_row_is_forbidden() {
        assert!(matches!(
            Guarded::<i32>::NotOwner.or_reject("photo"),
            Err(Error::ApiForbidden)
        ));
    }

    #[test]
    fn absent_row_is_not_found() {
        assert!(matches!(
            Guarded::<i32>::Missing.or_reject("photo"),
            Err(Error::NotFound("photo"))
        ));
    }

    #[test]
    fn deleted_caller_is_unauthenticated() {
        assert!(matches!(
            Guarded::<i32>::CallerGone.or_reject("photo"),
            Err(Error::AccountDeleted)
        ));
    }

    #[test]
    fn only_self_passes() {
        let ctx = Ctx::new(1, String::from("ana"), 30);
        assert!(ensure_self(&ctx, 1).is_ok());
        assert!(matches!(ensure_self(&ctx, 2), Err(Error::ApiForbidden)));
    }
}
