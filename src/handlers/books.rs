// handlers/books.rs - /api/books collection and record handlers

use axum::extract::State;
use serde_json::{json, Value};

use crate::api::{JsonObject, RecordId};
use crate::database::models::{Book, BookPatch};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::{expect_exact_keys, BOOK_UPDATE_KEYS, NEW_BOOK_KEYS};

/// GET /api/books - List every book in insertion order
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Book>> {
    let books = state.db.books().await.find().to_vec();
    tracing::debug!(count = books.len(), "listing books");

    Ok(ApiResponse::success(books))
}

/// GET /api/books/:id - Get a single book by id
pub async fn get(State(state): State<AppState>, RecordId(id): RecordId) -> ApiResult<Book> {
    let book = state
        .db
        .books()
        .await
        .find_by_id(id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Book not found"))?;

    Ok(ApiResponse::success(book))
}

/// POST /api/books - Add a book
///
/// Body must carry exactly `id`, `title` and `author`. Responds 201 with `{ "id": <id> }`.
pub async fn create(State(state): State<AppState>, payload: JsonObject) -> ApiResult<Value> {
    expect_exact_keys(&payload.0, NEW_BOOK_KEYS)?;
    let book: Book = payload.into_typed()?;

    let mut books = state.db.books_mut().await;
    let id = books.insert_one(book)?.id;
    tracing::info!(id, "book created");

    Ok(ApiResponse::created(json!({ "id": id })))
}

/// PUT /api/books/:id - Replace a book's title and author
///
/// Body must carry exactly `title` and `author`. Responds 204 with no body.
pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    payload: JsonObject,
) -> ApiResult<()> {
    expect_exact_keys(&payload.0, BOOK_UPDATE_KEYS)?;
    let patch: BookPatch = payload.into_typed()?;

    state.db.books_mut().await.update_one(|book| book.id == id, patch)?;
    tracing::info!(id, "book updated");

    Ok(ApiResponse::no_content())
}

/// DELETE /api/books/:id - Remove a book. Responds 204 with no body.
pub async fn delete(State(state): State<AppState>, RecordId(id): RecordId) -> ApiResult<()> {
    let removed = state.db.books_mut().await.delete_one(|book| book.id == id)?;
    tracing::info!(id = removed.id, title = %removed.title, "book deleted");

    Ok(ApiResponse::no_content())
}
