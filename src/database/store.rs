use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::database::collection::Collection;
use crate::database::models::{Book, User};

/// Owns every collection of the running service.
///
/// Each collection sits behind its own lock; a write guard covers the whole
/// check-and-mutate step of an insert, update or delete.
#[derive(Debug, Default)]
pub struct Database {
    books: RwLock<Collection<Book>>,
    users: RwLock<Collection<User>>,
}

impl Database {
    pub fn new(books: Collection<Book>, users: Collection<User>) -> Self {
        Self {
            books: RwLock::new(books),
            users: RwLock::new(users),
        }
    }

    pub async fn books(&self) -> RwLockReadGuard<'_, Collection<Book>> {
        self.books.read().await
    }

    pub async fn books_mut(&self) -> RwLockWriteGuard<'_, Collection<Book>> {
        self.books.write().await
    }

    pub async fn users(&self) -> RwLockReadGuard<'_, Collection<User>> {
        self.users.read().await
    }

    pub async fn users_mut(&self) -> RwLockWriteGuard<'_, Collection<User>> {
        self.users.write().await
    }
}
