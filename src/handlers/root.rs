// handlers/root.rs - service descriptor, health check and 404 fallback

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - Describe the service and its endpoints
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "In-N-Out Books",
        "version": version,
        "endpoints": {
            "books": "GET, POST /api/books",
            "book": "GET, PUT, DELETE /api/books/:id",
            "login": "POST /api/login",
            "security_questions": "POST /api/users/:email/verify-security-question",
            "health": "GET /health",
        }
    }))
}

/// GET /health - Liveness plus record counts
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let books = state.db.books().await.len();
    let users = state.db.users().await.len();

    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "books": books,
        "users": users,
    }))
}

/// Any unmatched route
pub async fn fallback() -> ApiError {
    ApiError::not_found("Not Found")
}

/// A known route hit with a method it does not serve
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}
