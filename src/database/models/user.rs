use serde::{Deserialize, Serialize};

use crate::database::collection::Record;

/// Number of security questions every user carries
pub const SECURITY_QUESTION_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub answer: String,
}

/// Stored user. `password` holds a bcrypt hash and never leaves the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub security_questions: Vec<SecurityQuestion>,
}

/// Replaces the stored password hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    pub password_hash: String,
}

impl Record for User {
    const LABEL: &'static str = "User";
    type Patch = PasswordChange;

    fn id(&self) -> i64 {
        self.id
    }

    fn apply(&mut self, patch: PasswordChange) {
        self.password = patch.password_hash;
    }
}
