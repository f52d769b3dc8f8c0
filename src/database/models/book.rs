use serde::{Deserialize, Serialize};

use crate::database::collection::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
}

/// Replacement content for an existing book. The id comes from the path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookPatch {
    pub title: String,
    pub author: String,
}

impl Record for Book {
    const LABEL: &'static str = "Book";
    type Patch = BookPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn apply(&mut self, patch: BookPatch) {
        self.title = patch.title;
        self.author = patch.author;
    }
}
