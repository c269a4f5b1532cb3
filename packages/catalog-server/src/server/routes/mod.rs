pub mod categories;
pub mod health;
pub mod listings;
pub mod orders;

use std::str::FromStr;

use axum::http::HeaderMap;

use crate::common::auth::{Actor, Role};
use crate::common::UserId;
use crate::server::error::ApiError;

/// Build the acting caller from headers populated by the auth collaborator.
///
/// The gateway in front of this service verifies credentials and forwards
/// `x-actor-id` and `x-actor-role`; their values are trusted as given.
pub fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, ApiError> {
    let id = headers
        .get("x-actor-id")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::bad_request("x-actor-id", "missing actor header"))?;
    let role = headers
        .get("x-actor-role")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::bad_request("x-actor-role", "missing actor header"))?;

    let id = UserId::parse(id).map_err(|err| ApiError::bad_request("x-actor-id", err))?;
    let role = Role::from_str(role).map_err(|err| ApiError::bad_request("x-actor-role", err))?;
    Ok(Actor::new(id, role))
}
