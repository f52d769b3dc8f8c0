// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::StoreError;
use crate::validation::{KeySetMismatch, Violation};

/// Message used for every malformed request body
pub const BAD_REQUEST: &str = "Bad Request";
/// Message used for invalid numeric path ids
pub const INVALID_ID: &str = "Input must be a number";
pub const UNAUTHORIZED: &str = "Unauthorized";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        violations: Vec<Violation>,
    },
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 405 Method Not Allowed
    MethodNotAllowed(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error; `detail` is for logs and development bodies only
    InternalServerError {
        message: String,
        detail: Option<String>,
    },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            // The parser's complaint goes to the stack, not the message
            ApiError::InvalidJson(_) => BAD_REQUEST,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::MethodNotAllowed(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::InternalServerError { message, .. } => message,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalServerError { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Diagnostic text shown in development mode
    fn stack(&self) -> String {
        match self {
            ApiError::InvalidJson(detail) => format!("InvalidJson: {detail}"),
            ApiError::InternalServerError {
                message,
                detail: Some(detail),
            } => format!("InternalServerError: {message}\n    caused by: {detail}"),
            other => format!("{other:?}"),
        }
    }

    /// Convert to JSON response body. `stack` is present only when `include_stack` is set.
    pub fn to_json(&self, include_stack: bool) -> Value {
        let mut response = json!({
            "type": "error",
            "status": self.status_code().as_u16(),
            "code": self.error_code(),
            "message": self.message(),
        });

        if let ApiError::ValidationError { violations, .. } = self {
            if !violations.is_empty() {
                response["violations"] = json!(violations);
            }
        }

        if include_stack {
            response["stack"] = json!(self.stack());
        }

        response
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Non-numeric record id in the path
    pub fn invalid_id() -> Self {
        ApiError::BadRequest(INVALID_ID.to_string())
    }

    pub fn validation_error(violations: Vec<Violation>) -> Self {
        ApiError::ValidationError {
            message: BAD_REQUEST.to_string(),
            violations,
        }
    }

    pub fn invalid_json(detail: impl Into<String>) -> Self {
        ApiError::InvalidJson(detail.into())
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized(UNAUTHORIZED.to_string())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn method_not_allowed() -> Self {
        ApiError::MethodNotAllowed("Method Not Allowed".to_string())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    /// Generic 500; `detail` is logged and only exposed in development mode
    pub fn internal(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        tracing::error!("internal error: {}", detail);
        ApiError::InternalServerError {
            message: INTERNAL_SERVER_ERROR.to_string(),
            detail: Some(detail),
        }
    }
}

// Convert other error types to ApiError
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::not_found(err.to_string()),
            StoreError::DuplicateKey { .. } => ApiError::conflict(err.to_string()),
        }
    }
}

impl From<KeySetMismatch> for ApiError {
    fn from(err: KeySetMismatch) -> Self {
        tracing::warn!(received = ?err.received, "Bad Request: missing keys or extra keys");
        let violations = err
            .missing
            .iter()
            .map(|key| Violation::new(format!("/{key}"), "missing required key"))
            .chain(
                err.unexpected
                    .iter()
                    .map(|key| Violation::new(format!("/{key}"), "unexpected key")),
            )
            .collect();
        ApiError::validation_error(violations)
    }
}

impl From<Vec<Violation>> for ApiError {
    fn from(violations: Vec<Violation>) -> Self {
        tracing::warn!(?violations, "Bad Request: invalid request body");
        ApiError::validation_error(violations)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::internal(format!("background task failed: {err}"))
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

/// Error body including `stack`, carried on the response for the diagnostics
/// middleware to swap in when the service runs in development mode.
#[derive(Debug, Clone)]
pub struct DiagnosticBody(pub Value);

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let mut response = (self.status_code(), Json(self.to_json(false))).into_response();
        response.extensions_mut().insert(DiagnosticBody(self.to_json(true)));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::invalid_id().status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::validation_error(vec![]).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::invalid_json("eof").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unauthorized().status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::not_found("Book not found").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::method_not_allowed().status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ApiError::conflict("dup").status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::internal("boom").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_production_body_omits_stack() {
        let body = ApiError::internal("bcrypt exploded").to_json(false);
        assert_eq!(body["type"], "error");
        assert_eq!(body["status"], 500);
        assert_eq!(body["message"], INTERNAL_SERVER_ERROR);
        assert!(body.get("stack").is_none());
        assert!(!body.to_string().contains("bcrypt"));
    }

    #[test]
    fn test_development_body_includes_stack() {
        let body = ApiError::internal("bcrypt exploded").to_json(true);
        assert!(body["stack"].as_str().unwrap().contains("bcrypt exploded"));
    }

    #[test]
    fn test_response_body_omits_stack_and_carries_diagnostics() {
        let response = ApiError::internal("bcrypt exploded").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let DiagnosticBody(diagnostics) = response.extensions().get::<DiagnosticBody>().cloned().unwrap();
        assert!(diagnostics["stack"].as_str().unwrap().contains("bcrypt exploded"));
    }

    #[test]
    fn test_invalid_json_uses_generic_message() {
        let body = ApiError::invalid_json("expected value at line 1 column 1").to_json(false);
        assert_eq!(body["message"], BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_JSON");
    }

    #[test]
    fn test_key_mismatch_becomes_bad_request_with_violations() {
        let err: ApiError = KeySetMismatch {
            expected: vec!["id".into(), "title".into(), "author".into()],
            received: vec!["id".into(), "author".into(), "isbn".into()],
            missing: vec!["title".into()],
            unexpected: vec!["isbn".into()],
        }
        .into();

        let body = err.to_json(false);
        assert_eq!(body["message"], BAD_REQUEST);
        assert_eq!(body["violations"][0]["path"], "/title");
        assert_eq!(body["violations"][1]["path"], "/isbn");
    }

    #[test]
    fn test_store_errors_map_to_status() {
        let not_found: ApiError = StoreError::NotFound { label: "Book" }.into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.message(), "Book not found");

        let duplicate: ApiError = StoreError::DuplicateKey { label: "Book", id: 1 }.into();
        assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);
        assert_eq!(duplicate.message(), "Book with id 1 already exists");
    }
}
