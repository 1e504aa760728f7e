//! Borrow records repository for database operations

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{BorrowRecord, ListQuery},
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List borrow records in primary key order
    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<BorrowRecord>> {
        let records = sqlx::query_as::<_, BorrowRecord>(
            "SELECT * FROM borrow_records ORDER BY borrow_id LIMIT $1 OFFSET $2",
        )
        .bind(query.limit())
        .bind(query.skip())
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// Get borrow record by ID, locking the row for the rest of the session
    pub async fn get_for_update(&self, conn: &mut PgConnection, id: i32) -> AppResult<BorrowRecord> {
        sqlx::query_as::<_, BorrowRecord>(
            "SELECT * FROM borrow_records WHERE borrow_id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(BorrowRecord::NOT_FOUND.to_string()))
    }

    /// Insert a new borrow record
    pub async fn create(&self, conn: &mut PgConnection, record: &BorrowRecord) -> AppResult<BorrowRecord> {
        sqlx::query_as::<_, BorrowRecord>(
            r#"
            INSERT INTO borrow_records (borrow_id, member_id, book_id, borrow_date, due_date, return_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(record.borrow_id)
        .bind(record.member_id)
        .bind(record.book_id)
        .bind(record.borrow_date)
        .bind(record.due_date)
        .bind(record.return_date)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::on_unique_violation(e, BorrowRecord::DUPLICATE))
    }

    /// Overwrite every column with the merged row
    pub async fn update(&self, conn: &mut PgConnection, record: &BorrowRecord) -> AppResult<BorrowRecord> {
        sqlx::query_as::<_, BorrowRecord>(
            r#"
            UPDATE borrow_records
            SET member_id = $2, book_id = $3, borrow_date = $4, due_date = $5, return_date = $6
            WHERE borrow_id = $1
            RETURNING *
            "#,
        )
        .bind(record.borrow_id)
        .bind(record.member_id)
        .bind(record.book_id)
        .bind(record.borrow_date)
        .bind(record.due_date)
        .bind(record.return_date)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::on_unique_violation(e, BorrowRecord::DUPLICATE))?
        .ok_or_else(|| AppError::NotFound(BorrowRecord::NOT_FOUND.to_string()))
    }

    /// Delete a borrow record
    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM borrow_records WHERE borrow_id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(BorrowRecord::NOT_FOUND.to_string()));
        }
        Ok(())
    }
}
