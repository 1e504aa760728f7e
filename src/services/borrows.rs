//! Borrow records service

use crate::{
    error::{AppError, AppResult},
    models::{
        borrow::{CreateBorrow, UpdateBorrow},
        BorrowRecord, ListQuery,
    },
    repository::{Repository, Session},
};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<BorrowRecord>> {
        self.repository.borrows.list(query).await
    }

    /// Create a borrow record after checking the member, the book and the dates.
    ///
    /// Stock counts on the referenced book are left untouched.
    pub async fn create(&self, data: CreateBorrow) -> AppResult<BorrowRecord> {
        let record = BorrowRecord::from(data);

        let mut session = self.repository.session().await?;
        self.check_member(&mut session, record.member_id).await?;
        self.check_book(&mut session, record.book_id).await?;
        if let Err(e) = record.check_dates() {
            tracing::debug!(borrow_id = record.borrow_id, "Rejected borrow: {}", e);
            return Err(e);
        }

        let record = self.repository.borrows.create(&mut session, &record).await?;
        session.commit().await?;

        tracing::info!(
            borrow_id = record.borrow_id,
            member_id = record.member_id,
            book_id = record.book_id,
            "Borrow record created"
        );
        Ok(record)
    }

    /// Merge the partial update into the stored row and re-check references and dates
    pub async fn update(&self, id: i32, data: UpdateBorrow) -> AppResult<BorrowRecord> {
        let mut session = self.repository.session().await?;
        let mut record = self.repository.borrows.get_for_update(&mut session, id).await?;

        let member_changed = data.member_id.is_some_and(|m| m != record.member_id);
        let book_changed = data.book_id.is_some_and(|b| b != record.book_id);

        record.apply(data);
        if member_changed {
            self.check_member(&mut session, record.member_id).await?;
        }
        if book_changed {
            self.check_book(&mut session, record.book_id).await?;
        }
        if let Err(e) = record.check_dates() {
            tracing::debug!(borrow_id = id, "Rejected borrow update: {}", e);
            return Err(e);
        }

        let record = self.repository.borrows.update(&mut session, &record).await?;
        session.commit().await?;

        tracing::info!(borrow_id = id, "Borrow record updated");
        Ok(record)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut session = self.repository.session().await?;
        self.repository.borrows.delete(&mut session, id).await?;
        session.commit().await?;

        tracing::info!(borrow_id = id, "Borrow record deleted");
        Ok(())
    }

    async fn check_member(&self, session: &mut Session, member_id: i32) -> AppResult<()> {
        if !self.repository.members.exists(session, member_id).await? {
            tracing::debug!(member_id, "Borrow references unknown member");
            return Err(AppError::BusinessRule(BorrowRecord::INVALID_MEMBER.to_string()));
        }
        Ok(())
    }

    async fn check_book(&self, session: &mut Session, book_id: i32) -> AppResult<()> {
        if !self.repository.books.exists(session, book_id).await? {
            tracing::debug!(book_id, "Borrow references unknown book");
            return Err(AppError::BusinessRule(BorrowRecord::INVALID_BOOK.to_string()));
        }
        Ok(())
    }
}
