// handlers/users.rs - /api/users/:email handlers

use axum::extract::State;
use jsonschema::Validator;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{EmailParam, JsonObject};
use crate::auth;
use crate::database::models::{PasswordChange, SECURITY_QUESTION_COUNT};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::{self, InvalidSchema};

/// Request body of the security-question check
fn security_questions_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "newPassword": { "type": "string" },
            "securityQuestions": {
                "type": "array",
                "minItems": SECURITY_QUESTION_COUNT,
                "maxItems": SECURITY_QUESTION_COUNT,
                "items": {
                    "type": "object",
                    "properties": {
                        "answer": { "type": "string" }
                    },
                    "required": ["answer"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["securityQuestions"],
        "additionalProperties": false
    })
}

static SECURITY_QUESTIONS_VALIDATOR: Lazy<Result<Validator, InvalidSchema>> =
    Lazy::new(|| validation::compile(&security_questions_schema()));

#[derive(Debug, Deserialize)]
struct SubmittedAnswer {
    answer: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SecurityQuestionsRequest {
    new_password: Option<String>,
    security_questions: Vec<SubmittedAnswer>,
}

/// POST /api/users/:email/verify-security-question - Check a user's three answers
///
/// Expected Input:
/// ```json
/// {
///   "securityQuestions": [{ "answer": "..." }, { "answer": "..." }, { "answer": "..." }],
///   "newPassword": "optional string"
/// }
/// ```
///
/// Answers are compared by position. On success the stored password is replaced
/// when `newPassword` is present, and the user (without its hash) is returned.
pub async fn verify_security_question(
    State(state): State<AppState>,
    EmailParam(email): EmailParam,
    payload: JsonObject,
) -> ApiResult<Value> {
    let validator = SECURITY_QUESTIONS_VALIDATOR
        .as_ref()
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let body = Value::Object(payload.0);
    validation::validate(validator, &body)?;
    let request: SecurityQuestionsRequest =
        serde_json::from_value(body).map_err(|e| ApiError::internal(format!("validated body failed to decode: {e}")))?;

    let submitted: Vec<&str> = request
        .security_questions
        .iter()
        .map(|entry| entry.answer.as_str())
        .collect();

    let user = {
        let users = state.db.users().await;
        let Some(user) = users.find_one(|user| user.email == email) else {
            tracing::warn!(%email, "security questions for unknown email");
            return Err(ApiError::unauthorized());
        };
        if !auth::answers_match(&submitted, &user.security_questions) {
            tracing::warn!(%email, "security questions answered incorrectly");
            return Err(ApiError::unauthorized());
        }
        user.clone()
    };

    let user = match request.new_password {
        Some(new_password) => {
            let cost = state.bcrypt_cost;
            let password_hash =
                tokio::task::spawn_blocking(move || auth::hash_password(&new_password, cost)).await??;

            let updated = state
                .db
                .users_mut()
                .await
                .update_one(|stored| stored.id == user.id, PasswordChange { password_hash })?
                .clone();
            tracing::info!(%email, "password reset through security questions");
            updated
        }
        None => user,
    };

    tracing::info!(%email, "security questions answered");
    Ok(ApiResponse::success(json!({
        "message": "Security questions successfully answered",
        "user": user,
    })))
}
