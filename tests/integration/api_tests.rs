//! API integration tests against a real PostgreSQL database.
//!
//! Each test gets a fresh database with the migrations applied.
//! Run with: DATABASE_URL=postgres://... cargo test -- --ignored

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use lendbook_server::{
    api::create_router, config::AppConfig, repository::Repository, services::Services, AppState,
};

fn app(pool: PgPool) -> Router {
    let services = Services::new(Repository::new(pool));
    create_router(AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(services),
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn member(id: i32, email: &str) -> Value {
    json!({
        "member_id": id,
        "phone_number": 5550100 + id as i64,
        "email": email,
        "address": format!("{} Library Lane", id)
    })
}

fn book(id: i32, name: &str, total: i32, available: i32) -> Value {
    json!({
        "book_id": id,
        "name": name,
        "author": "Ursula K. Le Guin",
        "genre": "Fantasy",
        "total_stock": total,
        "available_stock": available
    })
}

fn borrow(id: i32, member_id: i32, book_id: i32, borrow: &str, ret: &str, due: &str) -> Value {
    json!({
        "borrow_id": id,
        "member_id": member_id,
        "book_id": book_id,
        "borrow_date": borrow,
        "return_date": ret,
        "due_date": due
    })
}

async fn seed_member_and_book(app: &Router) {
    let (status, _) = send(app, "POST", "/members", Some(member(1, "ged@roke.edu"))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(app, "POST", "/books", Some(book(1, "A Wizard of Earthsea", 3, 3))).await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore] // Run with: cargo test -- --ignored
async fn test_create_user_then_list(pool: PgPool) {
    let app = app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({ "user_id": 1, "name": "Ada", "username": "ada", "password": "pw" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["message"], "User added successfully");
    assert_eq!(
        body["data"],
        json!({ "user_id": 1, "name": "Ada", "username": "ada", "password": "pw" })
    );

    let (status, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "user_id": 1, "name": "Ada", "username": "ada", "password": "pw" }])
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_update_user_fields(pool: PgPool) {
    let app = app(pool);
    send(
        &app,
        "POST",
        "/users",
        Some(json!({ "user_id": 1, "name": "Ada", "username": "ada", "password": "pw" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "PUT",
        "/users/1",
        Some(json!({ "username": "countess", "password": "engine" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(
        body["data"],
        json!({ "user_id": 1, "name": "Ada", "username": "countess", "password": "engine" })
    );

    // Only name supplied; the other columns keep their values
    let (status, body) = send(&app, "PUT", "/users/1", Some(json!({ "name": "Ada Lovelace" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "countess");

    let (_, users) = send(&app, "GET", "/users", None).await;
    assert_eq!(
        users,
        json!([{ "user_id": 1, "name": "Ada Lovelace", "username": "countess", "password": "engine" }])
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_update_onto_existing_unique_value(pool: PgPool) {
    let app = app(pool);

    for (id, username) in [(1, "ada"), (2, "grace")] {
        let user = json!({ "user_id": id, "name": username, "username": username, "password": "pw" });
        let (status, _) = send(&app, "POST", "/users", Some(user)).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, body) = send(&app, "PUT", "/users/2", Some(json!({ "username": "ada" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already exists");

    send(&app, "POST", "/members", Some(member(1, "a@example.org"))).await;
    send(&app, "POST", "/members", Some(member(2, "b@example.org"))).await;
    let (status, body) = send(&app, "PUT", "/members/2", Some(json!({ "email": "a@example.org" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already exists");

    send(&app, "POST", "/books", Some(book(1, "The Lathe of Heaven", 2, 2))).await;
    send(&app, "POST", "/books", Some(book(2, "The Word for World Is Forest", 2, 2))).await;
    let (status, body) = send(
        &app,
        "PUT",
        "/books/2",
        Some(json!({ "name": "The Lathe of Heaven", "genre": "Novella" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Book name already exists");

    // Failed updates leave the stored rows untouched
    let (_, users) = send(&app, "GET", "/users", None).await;
    assert_eq!(users[1]["username"], "grace");
    let (_, members) = send(&app, "GET", "/members", None).await;
    assert_eq!(members[1]["email"], "b@example.org");
    let (_, books) = send(&app, "GET", "/books", None).await;
    assert_eq!(books[1]["name"], "The Word for World Is Forest");
    assert_eq!(books[1]["genre"], "Fantasy");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_duplicate_username_rejected(pool: PgPool) {
    let app = app(pool);
    let first = json!({ "user_id": 1, "name": "Ada", "username": "ada", "password": "pw" });
    let second = json!({ "user_id": 2, "name": "Other", "username": "ada", "password": "pw" });

    let (status, _) = send(&app, "POST", "/users", Some(first)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/users", Some(second)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already exists");

    let (_, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["name"], "Ada");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_duplicate_member_email_and_book_name(pool: PgPool) {
    let app = app(pool);

    send(&app, "POST", "/members", Some(member(1, "a@example.org"))).await;
    let (status, body) = send(&app, "POST", "/members", Some(member(2, "a@example.org"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already exists");

    send(&app, "POST", "/books", Some(book(1, "The Dispossessed", 1, 1))).await;
    let (status, body) = send(&app, "POST", "/books", Some(book(2, "The Dispossessed", 1, 1))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Book name already exists");

    // A reused primary key takes the same path
    let (status, body) = send(&app, "POST", "/books", Some(book(1, "Lavinia", 1, 1))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Book name already exists");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_update_missing_rows_is_not_found(pool: PgPool) {
    let app = app(pool);

    let cases = [
        ("/users/99", json!({ "name": "x" }), "User not found"),
        ("/members/99", json!({ "address": "x" }), "Member not found"),
        ("/books/99", json!({ "genre": "x" }), "Book not found"),
        ("/borrows/99", json!({ "book_id": 1 }), "Borrow record not found"),
    ];
    for (uri, body, message) in cases {
        let (status, response) = send(&app, "PUT", uri, Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(response["message"], message);
    }

    let (_, users) = send(&app, "GET", "/users", None).await;
    assert_eq!(users, json!([]));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_partial_update_keeps_other_fields(pool: PgPool) {
    let app = app(pool);
    send(&app, "POST", "/members", Some(member(1, "ged@roke.edu"))).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/members/1",
        Some(json!({ "address": "Gont", "email": null })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["message"], "Member updated successfully");
    assert_eq!(body["data"]["address"], "Gont");
    assert_eq!(body["data"]["email"], "ged@roke.edu");
    assert_eq!(body["data"]["phone_number"], 5550101);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_book_stock_invariant_on_merged_row(pool: PgPool) {
    let app = app(pool);

    let (status, _) = send(&app, "POST", "/books", Some(book(1, "Tehanu", 5, 5))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "PUT", "/books/1", Some(json!({ "total_stock": 4 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Available stock should be less than or equal to total stock");

    let (status, body) = send(
        &app,
        "PUT",
        "/books/1",
        Some(json!({ "total_stock": 4, "available_stock": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_stock"], 4);
    assert_eq!(body["data"]["available_stock"], 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_borrow_create_rules(pool: PgPool) {
    let app = app(pool);
    seed_member_and_book(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/borrows",
        Some(borrow(1, 42, 1, "2024-03-01T10:00:00Z", "2024-03-05T10:00:00Z", "2024-03-15T10:00:00Z")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid member id");

    let (status, body) = send(
        &app,
        "POST",
        "/borrows",
        Some(borrow(1, 1, 42, "2024-03-01T10:00:00Z", "2024-03-05T10:00:00Z", "2024-03-15T10:00:00Z")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid book id");

    let (status, body) = send(
        &app,
        "POST",
        "/borrows",
        Some(borrow(1, 1, 1, "2024-03-15T10:00:00Z", "2024-03-05T10:00:00Z", "2024-03-15T10:00:00Z")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Due date should be later than borrow date");

    let (status, body) = send(
        &app,
        "POST",
        "/borrows",
        Some(borrow(1, 1, 1, "2024-03-01T10:00:00Z", "2024-03-20T10:00:00Z", "2024-03-15T10:00:00Z")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Return date is out of bounds");

    let (_, records) = send(&app, "GET", "/borrows", None).await;
    assert_eq!(records, json!([]));

    let (status, body) = send(
        &app,
        "POST",
        "/borrows",
        Some(borrow(1, 1, 1, "2024-03-01T10:00:00Z", "2024-03-05T10:00:00Z", "2024-03-15T10:00:00Z")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Borrow created successfully");

    let (status, body) = send(
        &app,
        "POST",
        "/borrows",
        Some(borrow(1, 1, 1, "2024-04-01T10:00:00Z", "2024-04-05T10:00:00Z", "2024-04-15T10:00:00Z")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Borrow record already exists");

    // Stock is not touched by borrowing
    let (_, books) = send(&app, "GET", "/books", None).await;
    assert_eq!(books[0]["available_stock"], 3);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_borrow_update_checks_merged_dates(pool: PgPool) {
    let app = app(pool);
    seed_member_and_book(&app).await;
    send(
        &app,
        "POST",
        "/borrows",
        Some(borrow(1, 1, 1, "2024-03-01T10:00:00Z", "2024-03-05T10:00:00Z", "2024-03-15T10:00:00Z")),
    )
    .await;

    // Only due_date supplied; it now falls before the stored return date
    let (status, body) = send(
        &app,
        "PUT",
        "/borrows/1",
        Some(json!({ "due_date": "2024-03-04T10:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Return date is out of bounds");

    let (status, body) = send(&app, "PUT", "/borrows/1", Some(json!({ "member_id": 77 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid member id");

    let (status, body) = send(
        &app,
        "PUT",
        "/borrows/1",
        Some(json!({ "due_date": "2024-03-30T10:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Borrow updated successfully");
    assert_eq!(body["data"]["borrow_date"], "2024-03-01T10:00:00Z");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_borrow_dates_without_offset(pool: PgPool) {
    let app = app(pool);
    seed_member_and_book(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/borrows",
        Some(borrow(1, 1, 1, "2024-03-01T10:00:00", "2024-03-05", "2024-03-15 10:00:00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["borrow_date"], "2024-03-01T10:00:00Z");
    assert_eq!(body["data"]["return_date"], "2024-03-05T00:00:00Z");

    let (status, body) = send(&app, "PUT", "/borrows/1", Some(json!({ "due_date": "2024-03-20" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["due_date"], "2024-03-20T00:00:00Z");

    let (status, body) = send(&app, "PUT", "/borrows/1", Some(json!({ "due_date": "2024-03-04T23:59:59" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Return date is out of bounds");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_delete_and_restrict(pool: PgPool) {
    let app = app(pool);
    seed_member_and_book(&app).await;
    send(
        &app,
        "POST",
        "/borrows",
        Some(borrow(1, 1, 1, "2024-03-01T10:00:00Z", "2024-03-05T10:00:00Z", "2024-03-15T10:00:00Z")),
    )
    .await;

    let (status, body) = send(&app, "DELETE", "/members/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Member is referenced by borrow records");

    let (status, body) = send(&app, "DELETE", "/books/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Book is referenced by borrow records");

    let (status, body) = send(&app, "DELETE", "/borrows/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "detail": "Borrow record deleted successfully" }));

    let (status, body) = send(&app, "DELETE", "/members/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["detail"], "Member deleted successfully");

    let (status, _) = send(&app, "DELETE", "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);

    for uri in ["/members", "/books", "/borrows"] {
        let (_, rows) = send(&app, "GET", uri, None).await;
        assert_eq!(rows, json!([]), "{}", uri);
    }

    for uri in ["/members/1", "/books/1", "/borrows/1"] {
        let (status, _) = send(&app, "DELETE", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_list_pagination(pool: PgPool) {
    let app = app(pool);

    for id in 1..=15 {
        let (status, _) = send(
            &app,
            "POST",
            "/members",
            Some(member(id, &format!("member{}@example.org", id))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, page) = send(&app, "GET", "/members", None).await;
    assert_eq!(page.as_array().map(Vec::len), Some(10));

    let (status, page) = send(&app, "GET", "/members?skip=10&limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = page.as_array().expect("Expected array");
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["member_id"], 11);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_readiness_check(pool: PgPool) {
    let app = app(pool);

    let (status, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}
