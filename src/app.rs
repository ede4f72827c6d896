use axum::{
    extract::State,
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use serde_json::{json, Value};

use crate::handlers::{elevated, protected, public};
use crate::middleware::{require_admin, require_login, resolve_identity};
use crate::state::AppState;

/// Build the full router. Every request passes through identity resolution;
/// each tier then adds its own guard.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        // Login required
        .merge(user_routes())
        // Admin required
        .merge(admin_routes())
        .layer(from_fn_with_state(state.clone(), resolve_identity))
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/auth/register", post(auth::register_post))
        .route("/auth/login", post(auth::login_post))
}

fn user_routes() -> Router<AppState> {
    use protected::users;

    Router::new()
        .route("/users", get(users::list_get))
        .route("/users/:username", get(users::user_get).patch(users::user_patch))
        .route_layer(from_fn(require_login))
}

fn admin_routes() -> Router<AppState> {
    use elevated::users;

    Router::new()
        .route("/users/:username", delete(users::user_delete))
        .route_layer(from_fn(require_admin))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Bankly API",
            "version": version,
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/auth/register, /auth/login (public - token acquisition)",
                "users": "/users, /users/:username (login required; DELETE requires admin)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
