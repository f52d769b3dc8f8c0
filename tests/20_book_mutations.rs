mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{body_json, TestServer};

#[tokio::test]
async fn create_book_returns_created_id() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/books"))
        .json(&json!({ "id": 99, "title": "Dying Inside", "author": "Pete Wentz" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(body_json(res).await?, json!({ "id": 99 }));

    let res = server.client.get(server.url("/api/books/99")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await?["title"], "Dying Inside");

    Ok(())
}

#[tokio::test]
async fn create_book_with_missing_title_is_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/books"))
        .json(&json!({ "id": 100, "author": "Pete Wentz" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await?["message"], "Bad Request");

    // Nothing was stored
    let res = server.client.get(server.url("/api/books/100")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn create_book_with_extra_key_is_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/books"))
        .json(&json!({ "id": 101, "title": "T", "author": "A", "isbn": "123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await?["message"], "Bad Request");

    Ok(())
}

#[tokio::test]
async fn create_book_with_duplicate_id_conflicts() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/books"))
        .json(&json!({ "id": 1, "title": "Impostor", "author": "Nobody" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = server.client.get(server.url("/api/books/1")).send().await?;
    assert_eq!(body_json(res).await?["title"], "The Fellowship of the Ring");

    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/books"))
        .header("content-type", "application/json")
        .body("{\"id\": 5,")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await?["message"], "Bad Request");

    Ok(())
}

#[tokio::test]
async fn delete_book_then_get_and_delete_again() -> Result<()> {
    let server = TestServer::spawn().await?;

    server
        .client
        .post(server.url("/api/books"))
        .json(&json!({ "id": 99, "title": "Dying Inside", "author": "Pete Wentz" }))
        .send()
        .await?;

    let res = server.client.delete(server.url("/api/books/99")).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(body_json(res).await?, Value::Null);

    let res = server.client.get(server.url("/api/books/99")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server.client.delete(server.url("/api/books/99")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await?["message"], "Book not found");

    Ok(())
}

#[tokio::test]
async fn delete_book_with_non_numeric_id_is_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.client.delete(server.url("/api/books/abc")).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await?["message"], "Input must be a number");

    // The seeded books are untouched
    let res = server.client.get(server.url("/api/books")).send().await?;
    assert_eq!(body_json(res).await?.as_array().map(Vec::len), Some(5));

    Ok(())
}

#[tokio::test]
async fn update_book_returns_no_content() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .put(server.url("/api/books/1"))
        .json(&json!({ "title": "Dying Inside", "author": "Pete Wentz" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = server.client.get(server.url("/api/books/1")).send().await?;
    let body = body_json(res).await?;
    assert_eq!(body, json!({ "id": 1, "title": "Dying Inside", "author": "Pete Wentz" }));

    Ok(())
}

#[tokio::test]
async fn update_book_with_non_numeric_id_is_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .put(server.url("/api/books/abc"))
        .json(&json!({ "title": "Dying Inside", "author": "Pete Wentz" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await?["message"], "Input must be a number");

    Ok(())
}

#[tokio::test]
async fn update_book_with_missing_author_is_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .put(server.url("/api/books/1"))
        .json(&json!({ "title": "Dying Inside" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await?["message"], "Bad Request");

    Ok(())
}

#[tokio::test]
async fn update_missing_book_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .put(server.url("/api/books/777"))
        .json(&json!({ "title": "Dying Inside", "author": "Pete Wentz" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
