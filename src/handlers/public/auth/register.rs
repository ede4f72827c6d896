// handlers/public/auth/register.rs - POST /auth/register handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use super::utils::require_present;
use crate::database::NewUser;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// POST /auth/register - create a standard user and return a token for it
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    require_present(&payload.username, "username")?;
    require_present(&payload.password, "password")?;

    let password_hash = state.hasher.hash(&payload.password)?;

    let user = state
        .store
        .register(NewUser {
            username: payload.username,
            password_hash,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
        })
        .await?;

    let token = state.codec.issue(&user.username, user.admin)?;
    tracing::info!("Registered user '{}'", user.username);

    Ok(ApiResponse::created(json!({ "token": token })))
}
