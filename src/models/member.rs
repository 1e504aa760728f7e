//! Member (library patron) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Member record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub member_id: i32,
    pub phone_number: i64,
    /// Unique contact address
    pub email: String,
    pub address: String,
}

impl Member {
    pub const NOT_FOUND: &'static str = "Member not found";
    pub const DUPLICATE: &'static str = "Email already exists";
    pub const REFERENCED: &'static str = "Member is referenced by borrow records";
}

/// Create member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    /// Caller-chosen primary key
    pub member_id: i32,
    pub phone_number: i64,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub address: String,
}

/// Update member request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMember {
    pub phone_number: Option<i64>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub address: Option<String>,
}

impl UpdateMember {
    pub fn is_empty(&self) -> bool {
        self.phone_number.is_none() && self.email.is_none() && self.address.is_none()
    }
}
