//! Repository layer for database operations
//!
//! Reads go straight to the pool. Writes take a `&mut PgConnection` borrowed
//! from the request's [`Session`] so every step of a request shares one
//! transaction.

pub mod books;
pub mod borrows;
pub mod members;
pub mod users;

use sqlx::{Pool, Postgres, Transaction};

use crate::error::AppResult;

/// Per-request storage session. Dropping it without `commit()` rolls back.
pub type Session = Transaction<'static, Postgres>;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub members: members::MembersRepository,
    pub books: books::BooksRepository,
    pub borrows: borrows::BorrowsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            members: members::MembersRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            borrows: borrows::BorrowsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Open a storage session for one request
    pub async fn session(&self) -> AppResult<Session> {
        Ok(self.pool.begin().await?)
    }

    /// Round-trip to the store, used by the readiness check
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
