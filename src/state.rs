use std::sync::Arc;

use crate::database::Database;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    /// Cost used when a handler hashes a new password
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(db: Database, bcrypt_cost: u32) -> Self {
        Self {
            db: Arc::new(db),
            bcrypt_cost,
        }
    }
}
