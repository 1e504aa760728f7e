//! Catalog endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{
        book::{CreateBook, UpdateBook},
        Book, ListQuery,
    },
    AppState,
};

use super::{Confirmation, Envelope, ValidatedJson, ValidatedPath, ValidatedQuery};

/// List books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(ListQuery),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>),
        (status = 400, description = "Invalid pagination", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list(&query).await?;
    Ok(Json(books))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 200, description = "Book created", body = super::BookEnvelope),
        (status = 400, description = "Stock invariant violated or book name already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<CreateBook>,
) -> AppResult<Json<Envelope<Book>>> {
    let book = state.services.books.create(data).await?;
    Ok(Envelope::new(book, "Book added successfully"))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = super::BookEnvelope),
        (status = 400, description = "Stock invariant violated or book name already exists", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    ValidatedPath(book_id): ValidatedPath<i32>,
    ValidatedJson(data): ValidatedJson<UpdateBook>,
) -> AppResult<Json<Envelope<Book>>> {
    let book = state.services.books.update(book_id, data).await?;
    Ok(Envelope::new(book, "Book updated successfully"))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = Confirmation),
        (status = 400, description = "Book still referenced by borrow records", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    ValidatedPath(book_id): ValidatedPath<i32>,
) -> AppResult<Json<Confirmation>> {
    state.services.books.delete(book_id).await?;
    Ok(Confirmation::new("Book deleted successfully"))
}
