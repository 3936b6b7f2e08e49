// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with its status code and client-facing message.
///
/// Every non-2xx body produced by the gateway is `{ "error": "<message>" }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request (local validation, never reaches a backend)
    InvalidRequestBody(String),
    InvalidParameter(String),
    WeakPassword,

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found (backend reported a missing entity, or no such route)
    NotFound(String),

    // 405 Method Not Allowed
    MethodNotAllowed,

    // 413 Payload Too Large
    PayloadTooLarge(String),

    // 400 Bad Request (backend business rule, reworded)
    DomainRejected(&'static str),

    // 500 Internal Server Error
    BackendUnavailable(String),
    BackendInternal(String),
}

pub const WEAK_PASSWORD: &str =
    "password must contain at least one small letter, one capital letter, one number, one symbol";

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::WeakPassword => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::DomainRejected(_) => StatusCode::BAD_REQUEST,
            ApiError::BackendUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BackendInternal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidRequestBody(msg) => msg,
            ApiError::InvalidParameter(msg) => msg,
            ApiError::WeakPassword => WEAK_PASSWORD,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::MethodNotAllowed => "method not allowed",
            ApiError::PayloadTooLarge(msg) => msg,
            ApiError::DomainRejected(msg) => msg,
            ApiError::BackendUnavailable(msg) => msg,
            ApiError::BackendInternal(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

impl ApiError {
    pub fn invalid_request_body(message: impl Into<String>) -> Self {
        ApiError::InvalidRequestBody(message.into())
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        ApiError::InvalidParameter(message.into())
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
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
