//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, borrows, health, members, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lendbook API",
        version = "0.1.0",
        description = "Library records REST API: users, members, books and borrow records",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::list_users,
        users::create_user,
        users::update_user,
        // Members
        members::list_members,
        members::create_member,
        members::update_member,
        members::delete_member,
        // Books
        books::list_books,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Borrows
        borrows::list_borrows,
        borrows::create_borrow,
        borrows::update_borrow,
        borrows::delete_borrow,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Members
            crate::models::member::Member,
            crate::models::member::CreateMember,
            crate::models::member::UpdateMember,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Borrows
            crate::models::borrow::BorrowRecord,
            crate::models::borrow::CreateBorrow,
            crate::models::borrow::UpdateBorrow,
            // Wrappers
            crate::api::UserEnvelope,
            crate::api::MemberEnvelope,
            crate::api::BookEnvelope,
            crate::api::BorrowEnvelope,
            crate::api::Confirmation,
            crate::models::pagination::ListQuery,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User accounts"),
        (name = "members", description = "Library members"),
        (name = "books", description = "Catalog"),
        (name = "borrows", description = "Borrow records")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
