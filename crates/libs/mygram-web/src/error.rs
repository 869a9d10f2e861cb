//! Web layer errors and their JSON rendering.
//!
//! Every error becomes `{"message": ..., "errors": [...]}` with a status
//! code matching its kind. Storage, hashing and signing failures are
//! logged and reported as a generic internal error.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use tracing::error;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Models(#[from] mygram_models::error::Error),

    #[error(transparent)]
    Auth(#[from] mygram_auth::error::Error),

    #[error("Invalid request body: {0}")]
    Json(#[from] JsonRejection),

    #[error("Invalid path parameter: {0}")]
    Path(#[from] PathRejection),

    #[error("Invalid query parameter: {0}")]
    Query(#[from] QueryRejection),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Conflict: {0}")]
    Conflict(&'static str),

    /* Api Errors */
    #[error("API Forbidden")]
    ApiForbidden,

    #[error("Auth Token Creation")]
    AuthTokenCreation,

    #[error("Wrong Credentials")]
    WrongCredentials,

    #[error("Missing Credentials")]
    MissingCredentials,

    #[error("Context Missing")]
    CtxMissing,

    #[error("Account Deleted")]
    AccountDeleted,
}

impl Error {
    /// Single rule validation failure.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }
}

/// JSON error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Error {
    fn status_and_body(self) -> (StatusCode, ErrorResponse) {
        let plain = |status: StatusCode, message: &str| {
            (
                status,
                ErrorResponse {
                    message: String::from(message),
                    errors: Vec::new(),
                },
            )
        };

        match self {
            Error::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: String::from("Invalid request"),
                    errors,
                },
            ),
            Error::Json(rejection) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: String::from("Invalid request body"),
                    errors: vec![rejection.body_text()],
                },
            ),
            Error::Path(rejection) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: String::from("Invalid required param"),
                    errors: vec![rejection.body_text()],
                },
            ),
            Error::Query(rejection) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: String::from("Invalid query param"),
                    errors: vec![rejection.body_text()],
                },
            ),
            Error::NotFound(what) => plain(StatusCode::NOT_FOUND, &format!("{what} not found")),
            Error::Conflict(what) => plain(StatusCode::CONFLICT, what),
            Error::WrongCredentials => plain(StatusCode::UNAUTHORIZED, "Invalid credentials"),
            Error::MissingCredentials | Error::CtxMissing => {
                plain(StatusCode::UNAUTHORIZED, "Missing credentials")
            }
            Error::AccountDeleted => plain(StatusCode::UNAUTHORIZED, "Account no longer exists"),
            Error::ApiForbidden => plain(StatusCode::FORBIDDEN, "Access forbidden"),
            Error::Auth(err) => match err {
                mygram_auth::error::Error::InvalidToken
                | mygram_auth::error::Error::WrongTokenKind => {
                    plain(StatusCode::UNAUTHORIZED, "Invalid authentication token")
                }
                mygram_auth::error::Error::TokenMissing => {
                    plain(StatusCode::UNAUTHORIZED, "Authentication required")
                }
                mygram_auth::error::Error::TokenExpired => {
                    plain(StatusCode::UNAUTHORIZED, "Authentication token expired")
                }
                mygram_auth::error::Error::TokenNotYetValid => {
                    plain(StatusCode::UNAUTHORIZED, "Authentication token not yet valid")
                }
                mygram_auth::error::Error::PasswordTooLong(max) => (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        message: String::from("Invalid request"),
                        errors: vec![format!("password must be at most {max} bytes")],
                    },
                ),
                mygram_auth::error::Error::TokenCreation(_)
                | mygram_auth::error::Error::InvalidLifetime
                | mygram_auth::error::Error::PasswordHash(_) => {
                    plain(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
            Error::AuthTokenCreation | Error::Models(_) => {
                plain(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        error!("Creating API error response for error: {:?}", self);
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}
