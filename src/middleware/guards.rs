//! Access guards, layered per route tier after `resolve_identity`.

use axum::{extract::Request, middleware::Next, response::Response};

use super::auth::Identity;
use crate::error::ApiError;

/// Reject unless an identity was resolved for this request
pub async fn require_login(request: Request, next: Next) -> Result<Response, ApiError> {
    if request.extensions().get::<Identity>().is_none() {
        return Err(ApiError::unauthorized("Unauthorized"));
    }
    Ok(next.run(request).await)
}

/// Reject unless the resolved identity is an admin
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let caller = request
        .extensions()
        .get::<Identity>()
        .map(|identity| (identity.username.clone(), identity.is_admin));

    match caller {
        Some((_, true)) => Ok(next.run(request).await),
        Some((username, false)) => {
            tracing::debug!("Admin route refused for '{}'", username);
            Err(ApiError::unauthorized("Unauthorized"))
        }
        None => Err(ApiError::unauthorized("Unauthorized")),
    }
}
