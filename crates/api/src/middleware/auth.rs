//! # Caller identity
//!
//! Authentication happens upstream; the auth proxy forwards the signed-in
//! user as headers. This extractor only turns those headers into a `Caller`
//! and rejects requests that carry none.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use classgate_core::{errors::ClassError, models::enrollment::Caller};
use uuid::Uuid;

use super::error_handling::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";

/// The signed-in user making the request.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller(pub Caller);

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedCaller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header(parts, USER_ID_HEADER).ok_or_else(|| {
            ClassError::Authentication(format!("Missing {} header", USER_ID_HEADER))
        })?;
        let user_id = Uuid::parse_str(user_id).map_err(|_| {
            ClassError::Authentication(format!("Invalid {} header", USER_ID_HEADER))
        })?;
        let display_name = header(parts, USER_NAME_HEADER).ok_or_else(|| {
            ClassError::Authentication(format!("Missing {} header", USER_NAME_HEADER))
        })?;

        Ok(AuthenticatedCaller(Caller {
            user_id,
            display_name: display_name.to_string(),
        }))
    }
}
