//! Member management endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{
        member::{CreateMember, UpdateMember},
        ListQuery, Member,
    },
    AppState,
};

use super::{Confirmation, Envelope, ValidatedJson, ValidatedPath, ValidatedQuery};

/// List members
#[utoipa::path(
    get,
    path = "/members",
    tag = "members",
    params(ListQuery),
    responses(
        (status = 200, description = "List of members", body = Vec<Member>),
        (status = 400, description = "Invalid pagination", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_members(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> AppResult<Json<Vec<Member>>> {
    let members = state.services.members.list(&query).await?;
    Ok(Json(members))
}

/// Register a new member
#[utoipa::path(
    post,
    path = "/members",
    tag = "members",
    request_body = CreateMember,
    responses(
        (status = 200, description = "Member created", body = super::MemberEnvelope),
        (status = 400, description = "Invalid input or email already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_member(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<CreateMember>,
) -> AppResult<Json<Envelope<Member>>> {
    let member = state.services.members.create(&data).await?;
    Ok(Envelope::new(member, "Member added successfully"))
}

/// Update a member
#[utoipa::path(
    put,
    path = "/members/{member_id}",
    tag = "members",
    params(
        ("member_id" = i32, Path, description = "Member ID")
    ),
    request_body = UpdateMember,
    responses(
        (status = 200, description = "Member updated", body = super::MemberEnvelope),
        (status = 400, description = "Invalid input or email already exists", body = crate::error::ErrorResponse),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_member(
    State(state): State<AppState>,
    ValidatedPath(member_id): ValidatedPath<i32>,
    ValidatedJson(data): ValidatedJson<UpdateMember>,
) -> AppResult<Json<Envelope<Member>>> {
    let member = state.services.members.update(member_id, &data).await?;
    Ok(Envelope::new(member, "Member updated successfully"))
}

/// Delete a member
#[utoipa::path(
    delete,
    path = "/members/{member_id}",
    tag = "members",
    params(
        ("member_id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member deleted", body = Confirmation),
        (status = 400, description = "Member still referenced by borrow records", body = crate::error::ErrorResponse),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_member(
    State(state): State<AppState>,
    ValidatedPath(member_id): ValidatedPath<i32>,
) -> AppResult<Json<Confirmation>> {
    state.services.members.delete(member_id).await?;
    Ok(Confirmation::new("Member deleted successfully"))
}
