pub mod extract;

pub use extract::{parse_id, EmailParam, JsonObject, RecordId};
