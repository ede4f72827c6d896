// handlers/elevated/users/delete.rs - DELETE /users/:username handler

use axum::{
    extract::{Path, State},
    Extension,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Identity};
use crate::state::AppState;

/// DELETE /users/:username - `{message: "deleted"}`, or 404 if there was no such user
pub async fn user_delete(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Value> {
    if !state.store.delete(&username).await? {
        return Err(ApiError::not_found("No such user"));
    }

    tracing::info!("User '{}' deleted '{}'", identity.username, username);
    Ok(ApiResponse::success(json!({ "message": "deleted" })))
}
