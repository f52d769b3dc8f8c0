pub mod keys;
pub mod schema;

pub use keys::{expect_exact_keys, KeySetMismatch, BOOK_UPDATE_KEYS, LOGIN_KEYS, NEW_BOOK_KEYS};
pub use schema::{compile, validate, InvalidSchema, Violation};
