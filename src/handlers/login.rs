// handlers/login.rs - POST /api/login

use axum::extract::State;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::JsonObject;
use crate::auth;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::{expect_exact_keys, LOGIN_KEYS};

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// POST /api/login - Check an email and password against the stored bcrypt hash
///
/// Expected Input:
/// ```json
/// { "email": "string", "password": "string" }
/// ```
///
/// Responds 200 `{ "message": "Authentication successful" }`. An unknown email and a
/// wrong password both answer 401 `Unauthorized`.
pub async fn login(State(state): State<AppState>, payload: JsonObject) -> ApiResult<Value> {
    expect_exact_keys(&payload.0, LOGIN_KEYS)?;
    let Credentials { email, password } = payload.into_typed()?;

    // Copy the hash out so the lock is not held while bcrypt runs
    let stored_hash = state
        .db
        .users()
        .await
        .find_one(|user| user.email == email)
        .map(|user| user.password.clone());

    let Some(stored_hash) = stored_hash else {
        tracing::warn!(%email, "login for unknown email");
        return Err(ApiError::unauthorized());
    };

    let verified = tokio::task::spawn_blocking(move || auth::verify_password(&password, &stored_hash)).await??;
    if !verified {
        tracing::warn!(%email, "login rejected: password mismatch");
        return Err(ApiError::unauthorized());
    }

    tracing::info!(%email, "login succeeded");
    Ok(ApiResponse::success(json!({ "message": "Authentication successful" })))
}
