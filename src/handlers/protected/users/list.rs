// handlers/protected/users/list.rs - GET /users handler

use axum::extract::State;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /users - basic info only: `{users: [{username, first_name, last_name}, ...]}`
pub async fn list_get(State(state): State<AppState>) -> ApiResult<Value> {
    let users = state.store.list().await?;
    Ok(ApiResponse::success(json!({ "users": users })))
}
