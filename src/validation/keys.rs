use serde_json::{Map, Value};
use thiserror::Error;

pub const NEW_BOOK_KEYS: &[&str] = &["id", "title", "author"];
pub const BOOK_UPDATE_KEYS: &[&str] = &["title", "author"];
pub const LOGIN_KEYS: &[&str] = &["email", "password"];

/// The payload's key set differs from the expected one
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("expected keys {expected:?}, received {received:?}")]
pub struct KeySetMismatch {
    pub expected: Vec<String>,
    pub received: Vec<String>,
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
}

/// Require the payload's keys to equal `expected` exactly: nothing missing, nothing extra.
pub fn expect_exact_keys(payload: &Map<String, Value>, expected: &[&str]) -> Result<(), KeySetMismatch> {
    let missing: Vec<String> = expected
        .iter()
        .filter(|key| !payload.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    let unexpected: Vec<String> = payload
        .keys()
        .filter(|key| !expected.contains(&key.as_str()))
        .cloned()
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        return Ok(());
    }

    Err(KeySetMismatch {
        expected: expected.iter().map(|key| key.to_string()).collect(),
        received: payload.keys().cloned().collect(),
        missing,
        unexpected,
    })
}
