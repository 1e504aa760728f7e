//! Borrow record (loan transaction) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::timestamp;
use crate::error::{AppError, AppResult};

/// Borrow record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRecord {
    pub borrow_id: i32,
    pub member_id: i32,
    pub book_id: i32,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
}

impl BorrowRecord {
    pub const NOT_FOUND: &'static str = "Borrow record not found";
    pub const DUPLICATE: &'static str = "Borrow record already exists";
    pub const INVALID_MEMBER: &'static str = "Invalid member id";
    pub const INVALID_BOOK: &'static str = "Invalid book id";
    pub const DUE_BEFORE_BORROW: &'static str = "Due date should be later than borrow date";
    pub const RETURN_OUT_OF_BOUNDS: &'static str = "Return date is out of bounds";

    /// Check `borrow_date < due_date` and `borrow_date < return_date < due_date`
    pub fn check_dates(&self) -> AppResult<()> {
        if self.due_date <= self.borrow_date {
            return Err(AppError::BusinessRule(Self::DUE_BEFORE_BORROW.to_string()));
        }
        if !(self.borrow_date < self.return_date && self.return_date < self.due_date) {
            return Err(AppError::BusinessRule(Self::RETURN_OUT_OF_BOUNDS.to_string()));
        }
        Ok(())
    }

    /// Overlay the fields present in `changes` onto this row
    pub fn apply(&mut self, changes: UpdateBorrow) {
        if let Some(member_id) = changes.member_id {
            self.member_id = member_id;
        }
        if let Some(book_id) = changes.book_id {
            self.book_id = book_id;
        }
        if let Some(borrow_date) = changes.borrow_date {
            self.borrow_date = borrow_date;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = due_date;
        }
        if let Some(return_date) = changes.return_date {
            self.return_date = return_date;
        }
    }
}

/// Create borrow record request; dates without an offset are read as UTC
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBorrow {
    /// Caller-chosen primary key
    pub borrow_id: i32,
    pub member_id: i32,
    pub book_id: i32,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub borrow_date: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub due_date: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub return_date: DateTime<Utc>,
}

impl From<CreateBorrow> for BorrowRecord {
    fn from(data: CreateBorrow) -> Self {
        Self {
            borrow_id: data.borrow_id,
            member_id: data.member_id,
            book_id: data.book_id,
            borrow_date: data.borrow_date,
            due_date: data.due_date,
            return_date: data.return_date,
        }
    }
}

/// Update borrow record request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBorrow {
    pub member_id: Option<i32>,
    pub book_id: Option<i32>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub borrow_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub return_date: Option<DateTime<Utc>>,
}
