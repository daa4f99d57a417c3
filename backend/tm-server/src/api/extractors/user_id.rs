//! Caller identity for REST handlers

use crate::ApiError;

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};

pub const USER_ID_HEADER: &str = "X-User-Id";

/// The calling user's id, taken from the `X-User-Id` header set by the
/// authenticating proxy in front of the service. Owners and vendors share
/// the same id space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(pub String);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let Some(value) = parts.headers.get(USER_ID_HEADER) else {
                return Err(ApiError::unauthorized("Missing X-User-Id header"));
            };

            let user_id = value
                .to_str()
                .map(str::trim)
                .map_err(|_| ApiError::unauthorized("X-User-Id header is not valid text"))?;

            if user_id.is_empty() {
                return Err(ApiError::unauthorized("X-User-Id header is empty"));
            }

            log::trace!("Request from user {}", user_id);
            Ok(UserId(user_id.to_string()))
        }
    }
}
