use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::error::ApiError;

/// Successful handler output, wrapped as `{"success": true, "data": ...}`
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: StatusCode,
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    success: bool,
    data: &'a T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { data, status_code: StatusCode::OK }
    }

    /// 201, for freshly registered users
    pub fn created(data: T) -> Self {
        Self { data, status_code: StatusCode::CREATED }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let envelope = Envelope { success: true, data: &self.data };
        match serde_json::to_value(&envelope) {
            Ok(body) => (self.status_code, Json(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                ApiError::internal_server_error("Failed to serialize response data").into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn body_of(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn wraps_data_in_success_envelope() {
        let response = ApiResponse::success(json!({"users": []})).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_of(response).await, json!({"success": true, "data": {"users": []}}));
    }

    #[tokio::test]
    async fn created_keeps_envelope() {
        let response = ApiResponse::created(json!({"token": "t"})).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_of(response).await["data"]["token"], "t");
    }
}
