// HTTP API Error Types
use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::{PasswordError, TokenError};
use crate::database::partial_update::UpdateBuildError;
use crate::database::DatabaseError;
use crate::policy::PolicyViolation;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 401 Unauthorized, carrying the policy rule that rejected the request
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "status": self.status_code(),
            "code": self.error_code(),
            "error": self.message(),
        })
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::DuplicateUser(username) => {
                ApiError::bad_request(format!("There already exists a user with username '{}'", username))
            }
            DatabaseError::ConfigMissing(what) => {
                tracing::error!("Database misconfigured: missing {}", what);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::Unavailable(msg) => {
                tracing::error!("Database unavailable: {}", msg);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::UnsupportedValue { .. } => {
                tracing::error!("Store rejected a bound value: {}", err);
                ApiError::internal_server_error("Database error occurred")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidToken(_) => ApiError::unauthorized("Invalid token"),
            TokenError::MissingSecret | TokenError::InvalidExpiry(_) | TokenError::Issue(_) => {
                tracing::error!("Token issuance failed: {}", err);
                ApiError::internal_server_error("Unable to issue token")
            }
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        tracing::error!("Password hashing failed: {}", err);
        ApiError::internal_server_error("An error occurred while processing your request")
    }
}

impl From<PolicyViolation> for ApiError {
    fn from(violation: PolicyViolation) -> Self {
        ApiError::forbidden(violation.to_string())
    }
}

impl From<UpdateBuildError> for ApiError {
    fn from(err: UpdateBuildError) -> Self {
        if err.is_caller_error() {
            ApiError::bad_request(err.to_string())
        } else {
            tracing::error!("Partial update misconfigured: {}", err);
            ApiError::internal_server_error("An error occurred while processing your request")
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_answers_as_unauthorized_with_its_own_code() {
        let err = ApiError::forbidden("Forbidden: username update not permitted");
        assert_eq!(err.status_code(), 401);
        let body = err.to_json();
        assert_eq!(body["code"], "FORBIDDEN");
        assert_eq!(body["error"], "Forbidden: username update not permitted");
        assert_eq!(body["success"], false);
    }

    #[test]
    fn duplicate_user_is_a_bad_request() {
        let err = ApiError::from(DatabaseError::DuplicateUser("u1".to_string()));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "There already exists a user with username 'u1'");
    }

    #[test]
    fn unsupported_value_is_an_internal_error() {
        let err = ApiError::from(DatabaseError::UnsupportedValue {
            column: "admin".to_string(),
            value: "\"yes\"".to_string(),
        });
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), "Database error occurred");
    }

    #[test]
    fn invalid_token_hides_detail() {
        let err = ApiError::from(TokenError::InvalidToken("InvalidSignature".to_string()));
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.message(), "Invalid token");
    }
}
