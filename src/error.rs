// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request (missing/malformed request fields)
    Validation(String),

    // 400 Bad Request (duplicate username; source-compatible status, not 409)
    Conflict(String),

    // 401 Unauthorized (bad credentials, missing/invalid token)
    Authentication(String),

    // 403 Forbidden (role not permitted; carries the karma-penalty side effect)
    Authorization(String),

    // 404 Not Found (identity resolves to no account)
    NotFound(String),

    // 502 Bad Gateway (translator service unavailable or errored)
    Translation(String),

    // 422 Unprocessable Entity (translated query failed against the store)
    Execution(String),

    // 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::Conflict(_) => 400,
            ApiError::Authentication(_) => 401,
            ApiError::Authorization(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Translation(_) => 502,
            ApiError::Execution(_) => 422,
            ApiError::Internal(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::Conflict(msg)
            | ApiError::Authentication(msg)
            | ApiError::Authorization(msg)
            | ApiError::NotFound(msg)
            | ApiError::Translation(msg)
            | ApiError::Execution(msg)
            | ApiError::Internal(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Authentication(_) => "AUTHENTICATION_ERROR",
            ApiError::Authorization(_) => "AUTHORIZATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Translation(_) => "TRANSLATION_ERROR",
            ApiError::Execution(_) => "EXECUTION_ERROR",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }

    // Convenience constructors

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ApiError::Conflict(msg.into())
    }

    pub fn authentication(msg: impl Into<String>) -> Self {
        ApiError::Authentication(msg.into())
    }

    pub fn authorization(msg: impl Into<String>) -> Self {
        ApiError::Authorization(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn translation(msg: impl Into<String>) -> Self {
        ApiError::Translation(msg.into())
    }

    pub fn execution(msg: impl Into<String>) -> Self {
        ApiError::Execution(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

impl From<crate::database::DatabaseError> for ApiError {
    fn from(err: crate::database::DatabaseError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl From<crate::translator::TranslatorError> for ApiError {
    fn from(err: crate::translator::TranslatorError) -> Self {
        ApiError::translation(err.to_string())
    }
}

impl From<crate::auth::JwtError> for ApiError {
    fn from(err: crate::auth::JwtError) -> Self {
        ApiError::internal(err.to_string())
    }
}
