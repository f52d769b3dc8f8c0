use thiserror::Error;

use crate::database::models::{SecurityQuestion, SECURITY_QUESTION_COUNT};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Hash a password for storage
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    Ok(bcrypt::verify(password, hash)?)
}

/// Compare submitted answers against the stored ones by position.
///
/// Exactly the first three positions are compared; the question text is ignored.
/// Fewer than three entries on either side never match.
pub fn answers_match(submitted: &[&str], stored: &[SecurityQuestion]) -> bool {
    if submitted.len() < SECURITY_QUESTION_COUNT || stored.len() < SECURITY_QUESTION_COUNT {
        return false;
    }

    submitted
        .iter()
        .zip(stored)
        .take(SECURITY_QUESTION_COUNT)
        .all(|(given, expected)| *given == expected.answer)
}
