// handlers/mod.rs - Route handlers
//
// Every handler validates its input before touching the store and returns
// `ApiResult`, so failures reach the client through `ApiError`'s envelope.
pub mod books;
pub mod login;
pub mod root;
pub mod users;
