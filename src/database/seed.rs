// Start-up data for the record store, read from YAML fixtures.
use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::auth::{self, AuthError};
use crate::database::collection::{Collection, StoreError};
use crate::database::store::Database;
use crate::database::models::{Book, SecurityQuestion, User, SECURITY_QUESTION_COUNT};

const BUILTIN_FIXTURES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/seed.yaml"));

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read fixtures from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("duplicate user email in fixtures: {0}")]
    DuplicateEmail(String),

    #[error("user {email} has {count} security questions, expected 3")]
    SecurityQuestionCount { email: String, count: usize },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// A user as written in a fixture file, with a plaintext password
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFixture {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub security_questions: Vec<SecurityQuestion>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub users: Vec<UserFixture>,
}

impl Fixtures {
    /// The books and users shipped with the service
    pub fn builtin() -> Result<Self, SeedError> {
        Self::from_yaml(BUILTIN_FIXTURES)
    }

    pub fn from_yaml(source: &str) -> Result<Self, SeedError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let source = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&source)
    }

    /// Hash every password with the given bcrypt cost and build the store
    pub fn into_database(self, bcrypt_cost: u32) -> Result<Database, SeedError> {
        let books = Collection::from_records(self.books)?;

        let mut emails = HashSet::new();
        let mut users = Vec::with_capacity(self.users.len());
        for fixture in self.users {
            if !emails.insert(fixture.email.clone()) {
                return Err(SeedError::DuplicateEmail(fixture.email));
            }
            if fixture.security_questions.len() != SECURITY_QUESTION_COUNT {
                return Err(SeedError::SecurityQuestionCount {
                    count: fixture.security_questions.len(),
                    email: fixture.email,
                });
            }

            users.push(User {
                id: fixture.id,
                password: auth::hash_password(&fixture.password, bcrypt_cost)?,
                email: fixture.email,
                security_questions: fixture.security_questions,
            });
        }
        let users = Collection::from_records(users)?;

        tracing::info!(books = books.len(), users = users.len(), "record store seeded");
        Ok(Database::new(books, users))
    }
}
