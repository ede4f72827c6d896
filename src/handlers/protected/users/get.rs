// handlers/protected/users/get.rs - GET /users/:username handler

use axum::extract::{Path, State};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /users/:username - `{user: {username, first_name, last_name, email, phone}}`
pub async fn user_get(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Value> {
    let user = state
        .store
        .get(&username)
        .await?
        .ok_or_else(|| ApiError::not_found("No such user"))?;

    Ok(ApiResponse::success(json!({ "user": user })))
}
