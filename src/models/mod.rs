//! Data models for Lendbook

pub mod book;
pub mod borrow;
pub mod member;
pub mod pagination;
pub mod timestamp;
pub mod user;

// Re-export commonly used types
pub use book::Book;
pub use borrow::BorrowRecord;
pub use member::Member;
pub use pagination::ListQuery;
pub use user::User;
