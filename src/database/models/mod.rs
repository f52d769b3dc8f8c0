pub mod book;
pub mod user;

pub use book::{Book, BookPatch};
pub use user::{PasswordChange, SecurityQuestion, User, SECURITY_QUESTION_COUNT};
