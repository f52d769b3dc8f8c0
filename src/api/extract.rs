// Request extraction shared by the JSON handlers.
use async_trait::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::validation::Violation;

/// A JSON request body that must be an object.
///
/// Rejections (bad content type, malformed JSON, non-object bodies) come back
/// as `ApiError` so they share the uniform error envelope.
#[derive(Debug, Clone)]
pub struct JsonObject(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;

        match value {
            Value::Object(map) => Ok(JsonObject(map)),
            other => Err(ApiError::invalid_json(format!(
                "expected a JSON object, got {}",
                json_type(&other)
            ))),
        }
    }
}

impl JsonObject {
    /// Deserialize into a typed request once the key set has been checked.
    /// Type mismatches are reported as a schema violation.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(Value::Object(self.0))
            .map_err(|e| ApiError::validation_error(vec![Violation::new("/", e.to_string())]))
    }
}

/// Numeric `:id` path segment. Anything that is not an integer, including a
/// segment that does not decode as UTF-8, is rejected as an invalid id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await.map_err(|rejection| {
            tracing::warn!(%rejection, "rejected undecodable id");
            ApiError::invalid_id()
        })?;
        parse_id(&raw).map(RecordId)
    }
}

/// `:email` path segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailParam(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for EmailParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(email) = Path::<String>::from_request_parts(parts, state).await.map_err(|rejection| {
            tracing::warn!(%rejection, "rejected undecodable email");
            ApiError::bad_request(crate::error::BAD_REQUEST)
        })?;
        Ok(EmailParam(email))
    }
}

/// Parse a record id from a path segment. Only a plain base-10 integer is
/// accepted; surrounding whitespace makes it invalid.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| {
        tracing::warn!(id = raw, "rejected non-numeric id");
        ApiError::invalid_id()
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
