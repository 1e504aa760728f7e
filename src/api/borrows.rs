//! Borrow record endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{
        borrow::{CreateBorrow, UpdateBorrow},
        BorrowRecord, ListQuery,
    },
    AppState,
};

use super::{Confirmation, Envelope, ValidatedJson, ValidatedPath, ValidatedQuery};

/// List borrow records
#[utoipa::path(
    get,
    path = "/borrows",
    tag = "borrows",
    params(ListQuery),
    responses(
        (status = 200, description = "List of borrow records", body = Vec<BorrowRecord>),
        (status = 400, description = "Invalid pagination", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_borrows(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> AppResult<Json<Vec<BorrowRecord>>> {
    let records = state.services.borrows.list(&query).await?;
    Ok(Json(records))
}

/// Record a new borrow
#[utoipa::path(
    post,
    path = "/borrows",
    tag = "borrows",
    request_body = CreateBorrow,
    responses(
        (status = 200, description = "Borrow record created", body = super::BorrowEnvelope),
        (status = 400, description = "Unknown member or book, invalid dates, or duplicate id", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_borrow(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<CreateBorrow>,
) -> AppResult<Json<Envelope<BorrowRecord>>> {
    let record = state.services.borrows.create(data).await?;
    Ok(Envelope::new(record, "Borrow created successfully"))
}

/// Update a borrow record
#[utoipa::path(
    put,
    path = "/borrows/{borrow_id}",
    tag = "borrows",
    params(
        ("borrow_id" = i32, Path, description = "Borrow record ID")
    ),
    request_body = UpdateBorrow,
    responses(
        (status = 200, description = "Borrow record updated", body = super::BorrowEnvelope),
        (status = 400, description = "Unknown member or book, invalid dates, or duplicate id", body = crate::error::ErrorResponse),
        (status = 404, description = "Borrow record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_borrow(
    State(state): State<AppState>,
    ValidatedPath(borrow_id): ValidatedPath<i32>,
    ValidatedJson(data): ValidatedJson<UpdateBorrow>,
) -> AppResult<Json<Envelope<BorrowRecord>>> {
    let record = state.services.borrows.update(borrow_id, data).await?;
    Ok(Envelope::new(record, "Borrow updated successfully"))
}

/// Delete a borrow record
#[utoipa::path(
    delete,
    path = "/borrows/{borrow_id}",
    tag = "borrows",
    params(
        ("borrow_id" = i32, Path, description = "Borrow record ID")
    ),
    responses(
        (status = 200, description = "Borrow record deleted", body = Confirmation),
        (status = 404, description = "Borrow record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_borrow(
    State(state): State<AppState>,
    ValidatedPath(borrow_id): ValidatedPath<i32>,
) -> AppResult<Json<Confirmation>> {
    state.services.borrows.delete(borrow_id).await?;
    Ok(Confirmation::new("Borrow record deleted successfully"))
}
