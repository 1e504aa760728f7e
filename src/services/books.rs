//! Catalog (books) service

use crate::{
    error::AppResult,
    models::{
        book::{CreateBook, UpdateBook},
        Book, ListQuery,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<Book>> {
        self.repository.books.list(query).await
    }

    /// Create a book; the stock invariant is checked before touching storage
    pub async fn create(&self, data: CreateBook) -> AppResult<Book> {
        let book = Book::from(data);
        if let Err(e) = book.check_stock() {
            tracing::debug!(book_id = book.book_id, "Rejected book: {}", e);
            return Err(e);
        }

        let mut session = self.repository.session().await?;
        let book = self.repository.books.create(&mut session, &book).await?;
        session.commit().await?;

        tracing::info!(book_id = book.book_id, "Book created");
        Ok(book)
    }

    /// Merge the partial update into the stored row and re-check stock on the result
    pub async fn update(&self, id: i32, data: UpdateBook) -> AppResult<Book> {
        let mut session = self.repository.session().await?;
        let mut book = self.repository.books.get_for_update(&mut session, id).await?;

        book.apply(data);
        if let Err(e) = book.check_stock() {
            tracing::debug!(book_id = id, "Rejected book update: {}", e);
            return Err(e);
        }

        let book = self.repository.books.update(&mut session, &book).await?;
        session.commit().await?;

        tracing::info!(book_id = id, "Book updated");
        Ok(book)
    }

    /// Delete a book that no borrow record references
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut session = self.repository.session().await?;
        self.repository.books.delete(&mut session, id).await?;
        session.commit().await?;

        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }
}
