// HTTP API Error Types
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::auth::{InvalidToken, PasswordError, TokenGenerationError};
use crate::database::models::ValidationErrors;
use crate::database::StoreError;

/// Message for every rejected or missing token
pub const AUTH_INVALID: &str = "Authentication invalid";

/// Message for both unknown email and wrong password
pub const INVALID_CREDENTIALS: &str = "Invalid Credentials";

const GENERIC_FAILURE: &str = "Something went wrong, try again later";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError(String),
    Duplicate(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Duplicate(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::ValidationError(msg)
            | ApiError::Duplicate(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "msg": self.message() })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error() -> Self {
        ApiError::InternalServerError(GENERIC_FAILURE.to_string())
    }

    /// Id path segment that cannot name any record
    pub fn malformed_id(value: &str) -> Self {
        ApiError::BadRequest(format!("No item found with id {}", value))
    }

    pub fn job_not_found(id: impl std::fmt::Display) -> Self {
        ApiError::NotFound(format!("No job with id {} found", id))
    }
}

// Convert other error types to ApiError
impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::ValidationError(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field } => ApiError::Duplicate(format!(
                "Duplicate value entered for {} field, please choose another value",
                field
            )),
            StoreError::Timeout(limit) => {
                tracing::error!("Store call timed out after {:?}", limit);
                ApiError::internal_server_error()
            }
            StoreError::Unavailable(msg) => {
                tracing::error!("Store unavailable: {}", msg);
                ApiError::ServiceUnavailable("Database temporarily unavailable".to_string())
            }
            StoreError::Corrupt(msg) => {
                tracing::error!("Corrupt record: {}", msg);
                ApiError::internal_server_error()
            }
            StoreError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error()
            }
        }
    }
}

impl From<InvalidToken> for ApiError {
    fn from(_: InvalidToken) -> Self {
        ApiError::unauthorized(AUTH_INVALID)
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        tracing::error!("{}", err);
        ApiError::internal_server_error()
    }
}

impl From<TokenGenerationError> for ApiError {
    fn from(err: TokenGenerationError) -> Self {
        tracing::error!("{}", err);
        ApiError::internal_server_error()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::bad_request("Expected request with `Content-Type: application/json`")
            }
            _ => ApiError::bad_request("Request body is not valid JSON"),
        }
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
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn validation_errors_join_messages() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "Please provide name");
        errors.add("email", "Please provide email");

        let api: ApiError = errors.into();
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(api.message(), "Please provide name,Please provide email");
    }

    #[test]
    fn duplicate_names_the_field() {
        let api: ApiError = StoreError::Duplicate {
            field: "email".to_string(),
        }
        .into();
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            api.message(),
            "Duplicate value entered for email field, please choose another value"
        );
    }

    #[test]
    fn internal_failures_do_not_leak_detail() {
        let api: ApiError = StoreError::Sqlx(sqlx::Error::PoolTimedOut).into();
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.message().to_lowercase().contains("pool"));

        let api: ApiError = StoreError::Timeout(Duration::from_millis(5)).into();
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message(), GENERIC_FAILURE);
    }

    #[test]
    fn application_errors_pass_through() {
        let api = ApiError::job_not_found("abc");
        assert_eq!(api.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(api.to_json(), json!({ "msg": "No job with id abc found" }));

        let api: ApiError = InvalidToken.into();
        assert_eq!(api, ApiError::Unauthorized(AUTH_INVALID.to_string()));

        let api = ApiError::malformed_id("123");
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(api.message(), "No item found with id 123");
    }
}
