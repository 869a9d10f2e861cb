#[derive(Debug, thiserror::Error, Clone)]
pub enum Error {
    #[error("Invalid Token")]
    InvalidToken,
    #[error("Token Missing")]
    TokenMissing,
    #[error("Token Expired")]
    TokenExpired,
    #[error("Token Not Yet Valid")]
    TokenNotYetValid,
    #[error("Wrong Token Kind")]
    WrongTokenKind,
    #[error("Invalid Token Lifetime")]
    InvalidLifetime,
    #[error(transparent)]
    TokenCreation(#[from] jsonwebtoken::errors::Error),

    #[error("Error hashing password {0}")]
    PasswordHash(argon2::password_hash::Error),
    #[error("Password longer than {0} bytes")]
    PasswordTooLong(usize),
}
