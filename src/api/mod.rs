//! API handlers for Lendbook REST endpoints

pub mod books;
pub mod borrows;
pub mod health;
pub mod members;
pub mod openapi;
pub mod users;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{request::Parts, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppError,
    models::{Book, BorrowRecord, Member, User},
    AppState,
};

/// Success wrapper returned by create and update endpoints
#[derive(Serialize, ToSchema)]
#[aliases(
    UserEnvelope = Envelope<User>,
    MemberEnvelope = Envelope<Member>,
    BookEnvelope = Envelope<Book>,
    BorrowEnvelope = Envelope<BorrowRecord>
)]
pub struct Envelope<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// The persisted row
    pub data: T,
    pub message: String,
    /// Always 201, for updates too; the HTTP status itself is 200
    pub status_code: u16,
}

impl<T> Envelope<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn new(data: T, message: &str) -> Json<Self> {
        Json(Self {
            data,
            message: message.to_string(),
            status_code: StatusCode::CREATED.as_u16(),
        })
    }
}

/// Plain confirmation returned by delete endpoints
#[derive(Serialize, ToSchema)]
pub struct Confirmation {
    pub detail: String,
}

impl Confirmation {
    pub fn new(detail: &str) -> Json<Self> {
        Json(Self {
            detail: detail.to_string(),
        })
    }
}

/// JSON body extractor that also runs `validator` rules
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        value
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        Ok(ValidatedJson(value))
    }
}

/// Query string extractor that also runs `validator` rules
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        value
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        Ok(ValidatedQuery(value))
    }
}

/// Path extractor whose rejection uses the uniform error body
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(ValidatedPath(value))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Users
        .route("/users", get(users::list_users))
        .route("/users", post(users::create_user))
        .route("/users/:user_id", put(users::update_user))
        // Members
        .route("/members", get(members::list_members))
        .route("/members", post(members::create_member))
        .route("/members/:member_id", put(members::update_member))
        .route("/members/:member_id", delete(members::delete_member))
        // Books
        .route("/books", get(books::list_books))
        .route("/books", post(books::create_book))
        .route("/books/:book_id", put(books::update_book))
        .route("/books/:book_id", delete(books::delete_book))
        // Borrows
        .route("/borrows", get(borrows::list_borrows))
        .route("/borrows", post(borrows::create_borrow))
        .route("/borrows/:borrow_id", put(borrows::update_borrow))
        .route("/borrows/:borrow_id", delete(borrows::delete_borrow))
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
