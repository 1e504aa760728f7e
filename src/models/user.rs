//! User model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub user_id: i32,
    pub name: String,
    /// Unique login name
    pub username: String,
    /// Stored and returned as supplied
    pub password: String,
}

impl User {
    pub const NOT_FOUND: &'static str = "User not found";
    pub const DUPLICATE: &'static str = "Username already exists";
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    /// Caller-chosen primary key
    pub user_id: i32,
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
    pub password: String,
}

/// Update user request; absent and null fields leave the stored value unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: Option<String>,
    pub password: Option<String>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.username.is_none() && self.password.is_none()
    }
}
