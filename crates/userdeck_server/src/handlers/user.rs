//! User HTTP handlers.

use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use userdeck_core::{User, UserDraft, UserPatch};

/// List every user in insertion order.
///
/// # Errors
/// Returns an error if the directory is unavailable.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, HttpError> {
    Ok(Json(state.directory.list()?))
}

/// Create a user; the directory assigns the id.
///
/// # Returns
/// `201 Created` with the stored user.
///
/// # Errors
/// Returns `422` with per-field messages when the draft is invalid.
pub async fn create_user(
    State(state): State<AppState>,
    Json(draft): Json<UserDraft>,
) -> Result<(StatusCode, Json<User>), HttpError> {
    let user = state.directory.create(draft)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Merge a partial record over an existing user.
///
/// # Errors
/// Returns `404` for an unknown id and `422` for invalid fields.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>, HttpError> {
    Ok(Json(state.directory.update(id, patch)?))
}

/// Delete a user.
///
/// # Returns
/// An empty JSON object.
///
/// # Errors
/// Returns `404` for an unknown id.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, HttpError> {
    state.directory.remove(id)?;
    Ok(Json(json!({})))
}
