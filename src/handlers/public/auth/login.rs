// handlers/public/auth/login.rs - POST /auth/login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use super::utils::require_present;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /auth/login - check credentials against the stored hash and return a token
///
/// Unknown users and wrong passwords get the same answer.
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    require_present(&payload.username, "username")?;
    require_present(&payload.password, "password")?;

    let user = match state.store.find_credentials(&payload.username).await? {
        Some(user) if state.hasher.verify(&payload.password, &user.password) => user,
        _ => {
            if state.audit_logging {
                tracing::warn!("Failed login for '{}'", payload.username);
            }
            return Err(ApiError::unauthorized("Cannot authenticate"));
        }
    };

    let token = state.codec.issue(&user.username, user.admin)?;
    tracing::info!("User '{}' logged in", user.username);

    Ok(ApiResponse::success(json!({ "token": token })))
}
