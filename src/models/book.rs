//! Book (catalog entry) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Book record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub book_id: i32,
    /// Unique title
    pub name: String,
    pub author: String,
    pub genre: String,
    pub total_stock: i32,
    pub available_stock: i32,
}

impl Book {
    pub const NOT_FOUND: &'static str = "Book not found";
    pub const DUPLICATE: &'static str = "Book name already exists";
    pub const REFERENCED: &'static str = "Book is referenced by borrow records";
    pub const STOCK_EXCEEDED: &'static str =
        "Available stock should be less than or equal to total stock";

    /// Check `available_stock <= total_stock`
    pub fn check_stock(&self) -> AppResult<()> {
        if self.available_stock > self.total_stock {
            return Err(AppError::BusinessRule(Self::STOCK_EXCEEDED.to_string()));
        }
        Ok(())
    }

    /// Overlay the fields present in `changes` onto this row
    pub fn apply(&mut self, changes: UpdateBook) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(author) = changes.author {
            self.author = author;
        }
        if let Some(genre) = changes.genre {
            self.genre = genre;
        }
        if let Some(total_stock) = changes.total_stock {
            self.total_stock = total_stock;
        }
        if let Some(available_stock) = changes.available_stock {
            self.available_stock = available_stock;
        }
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    /// Caller-chosen primary key
    pub book_id: i32,
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub author: String,
    pub genre: String,
    #[validate(range(min = 0, message = "Total stock must not be negative"))]
    pub total_stock: i32,
    #[validate(range(min = 0, message = "Available stock must not be negative"))]
    pub available_stock: i32,
}

impl From<CreateBook> for Book {
    fn from(data: CreateBook) -> Self {
        Self {
            book_id: data.book_id,
            name: data.name,
            author: data.author,
            genre: data.genre,
            total_stock: data.total_stock,
            available_stock: data.available_stock,
        }
    }
}

/// Update book request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    #[validate(range(min = 0, message = "Total stock must not be negative"))]
    pub total_stock: Option<i32>,
    #[validate(range(min = 0, message = "Available stock must not be negative"))]
    pub available_stock: Option<i32>,
}
