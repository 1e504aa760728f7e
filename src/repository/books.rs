//! Books repository for database operations

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Book, ListQuery},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List books in primary key order
    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books ORDER BY book_id LIMIT $1 OFFSET $2",
        )
        .bind(query.limit())
        .bind(query.skip())
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Check that a book exists, holding a share lock until the session ends
    pub async fn exists(&self, conn: &mut PgConnection, id: i32) -> AppResult<bool> {
        let found: Option<i32> =
            sqlx::query_scalar("SELECT book_id FROM books WHERE book_id = $1 FOR SHARE")
                .bind(id)
                .fetch_optional(conn)
                .await?;
        Ok(found.is_some())
    }

    /// Get book by ID, locking the row for the rest of the session
    pub async fn get_for_update(&self, conn: &mut PgConnection, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE book_id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(Book::NOT_FOUND.to_string()))
    }

    /// Insert a new book
    pub async fn create(&self, conn: &mut PgConnection, book: &Book) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (book_id, name, author, genre, total_stock, available_stock)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(book.book_id)
        .bind(&book.name)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.total_stock)
        .bind(book.available_stock)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::on_unique_violation(e, Book::DUPLICATE))
    }

    /// Overwrite every column with the merged row
    pub async fn update(&self, conn: &mut PgConnection, book: &Book) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET name = $2, author = $3, genre = $4, total_stock = $5, available_stock = $6
            WHERE book_id = $1
            RETURNING *
            "#,
        )
        .bind(book.book_id)
        .bind(&book.name)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.total_stock)
        .bind(book.available_stock)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::on_unique_violation(e, Book::DUPLICATE))?
        .ok_or_else(|| AppError::NotFound(Book::NOT_FOUND.to_string()))
    }

    /// Delete a book; rows still referenced by borrow records are kept
    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE book_id = $1")
            .bind(id)
            .execute(conn)
            .await
            .map_err(|e| AppError::on_foreign_key_violation(e, Book::REFERENCED))?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(Book::NOT_FOUND.to_string()));
        }
        Ok(())
    }
}
