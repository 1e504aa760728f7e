//! User management endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{
        user::{CreateUser, UpdateUser},
        ListQuery, User,
    },
    AppState,
};

use super::{Envelope, ValidatedJson, ValidatedPath, ValidatedQuery};

/// List users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(ListQuery),
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 400, description = "Invalid pagination", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> AppResult<Json<Vec<User>>> {
    let users = state.services.users.list(&query).await?;
    Ok(Json(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User created", body = super::UserEnvelope),
        (status = 400, description = "Invalid input or username already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<CreateUser>,
) -> AppResult<Json<Envelope<User>>> {
    let user = state.services.users.create(&data).await?;
    Ok(Envelope::new(user, "User added successfully"))
}

/// Update an existing user
#[utoipa::path(
    put,
    path = "/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = super::UserEnvelope),
        (status = 400, description = "Invalid input or username already exists", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    ValidatedPath(user_id): ValidatedPath<i32>,
    ValidatedJson(data): ValidatedJson<UpdateUser>,
) -> AppResult<Json<Envelope<User>>> {
    let user = state.services.users.update(user_id, &data).await?;
    Ok(Envelope::new(user, "User updated successfully"))
}
