pub mod collection;
pub mod store;
pub mod models;
pub mod seed;

pub use collection::{Collection, Record, StoreError};
pub use store::Database;
pub use seed::{Fixtures, SeedError};
