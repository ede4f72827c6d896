use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::Claims;
use crate::state::AppState;

/// Authenticated principal for the duration of one request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub is_admin: bool,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.username,
            is_admin: claims.admin,
        }
    }
}

/// Resolve the bearer token, if any, into an [`Identity`] request extension.
///
/// Never rejects: a missing or unverifiable token simply leaves the request
/// without an identity, and the guards decide whether that matters.
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Resolved afresh for every request
    request.extensions_mut().remove::<Identity>();

    if let Some(token) = extract_bearer_token(request.headers()).map(str::to_owned) {
        match state.codec.verify(&token) {
            Ok(claims) => {
                let identity = Identity::from(claims);
                tracing::debug!("Resolved identity '{}' (admin: {})", identity.username, identity.is_admin);
                request.extensions_mut().insert(identity);
            }
            Err(e) => {
                tracing::debug!("Ignoring unverifiable token: {}", e);
            }
        }
    }

    next.run(request).await
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
