//! Extractors that reject with the API error envelope.
//!
//! Plain `axum::Json`, `Path` and `Query` answer malformed input with a
//! text body. These wrappers route the rejection through [`Error`] so the
//! client always gets `{"message", "errors"}`.

use axum::extract::{FromRequest, FromRequestParts};

use crate::prelude::*;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct ApiQuery<T>(pub T);
