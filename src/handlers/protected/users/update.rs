// handlers/protected/users/update.rs - PATCH /users/:username handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::{json, Map, Value};

use crate::database::partial_update::{sql_for_partial_update, USERS};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Identity};
use crate::policy;
use crate::state::AppState;

/// Body keys that belong to the transport, not the record
const TRANSPORT_KEYS: &[&str] = &["_token"];

/// PATCH /users/:username - apply a sparse field map to one user
///
/// Runs policy, then builds the statement, then writes. Nothing reaches the
/// store unless both earlier stages accept the request.
///
/// Returns `{user: all-data-about-user}`, hash and admin flag included.
pub async fn user_patch(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Value> {
    let fields = match payload {
        Ok(Json(fields)) => strip_transport_keys(fields),
        // No body at all is an empty field set; the builder rejects it after policy runs
        Err(JsonRejection::MissingJsonContentType(_)) => Map::new(),
        Err(rejection) => return Err(rejection.into()),
    };

    if let Err(violation) = policy::authorize_update(&identity, &username, &fields) {
        if state.audit_logging {
            tracing::warn!("Update of '{}' by '{}' denied: {}", username, identity.username, violation);
        }
        return Err(violation.into());
    }

    let update = sql_for_partial_update(USERS.name, &fields, "username", username.as_str())?;

    let user = state
        .store
        .apply_update(&update)
        .await?
        .ok_or_else(|| ApiError::not_found("No such user"))?;

    tracing::info!(
        "User '{}' updated '{}': {:?}",
        identity.username,
        username,
        update.columns()
    );

    Ok(ApiResponse::success(json!({ "user": user })))
}

fn strip_transport_keys(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .filter(|(key, _)| !TRANSPORT_KEYS.contains(&key.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_keys_are_removed_and_order_kept() {
        let fields = json!({"last_name": "b", "_token": "abc", "first_name": "a"})
            .as_object()
            .cloned()
            .unwrap();
        let stripped = strip_transport_keys(fields);
        let keys: Vec<&str> = stripped.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["last_name", "first_name"]);
    }
}
