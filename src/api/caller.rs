//! Caller identity extractor.
//!
//! The `x-user-id` header is trusted as the authenticated user; issuing and
//! checking credentials happens upstream of this service.

use super::ApiError;
use crate::model::UserId;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The user on whose behalf the request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub UserId);

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(ApiError::unauthorized)?;
        let text = raw
            .to_str()
            .map_err(|_| ApiError::invalid_input("x-user-id is not valid text"))?;
        Ok(Caller(text.trim().parse()?))
    }
}
