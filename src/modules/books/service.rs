//! The book registry: an insertion-ordered, process-owned collection of books.

use std::sync::Arc;

use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Book, BookPayload, BookSummary};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookError {
    #[error("book name is required")]
    MissingName,

    #[error("readPage ({read_page}) must not exceed pageCount ({page_count})")]
    ReadPageExceedsPageCount { read_page: i64, page_count: i64 },

    #[error("book '{0}' not found")]
    NotFound(String),
}

/// Shared handle to the book collection.
///
/// Clones share the same collection. Every operation holds the lock for its
/// whole lookup-and-mutate step, so concurrent requests never interleave
/// inside one operation.
#[derive(Debug, Clone, Default)]
pub struct BookService {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BookService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a new book, returning its id.
    pub async fn create(&self, payload: BookPayload) -> Result<String, BookError> {
        let name = validate(&payload)?;
        let finished = payload.is_finished();
        let now = OffsetDateTime::now_utc();

        let mut books = self.books.write().await;
        let mut id = new_book_id();
        while books.iter().any(|book| book.id == id) {
            id = new_book_id();
        }

        let book = Book {
            id: id.clone(),
            name,
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            finished,
            page_count: payload.page_count.flatten(),
            read_page: payload.read_page.flatten(),
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        };
        books.push(book);

        tracing::debug!(book_id = %id, total = books.len(), "book created");
        Ok(id)
    }

    /// Projection of every stored book, in insertion order.
    pub async fn list(&self) -> Vec<BookSummary> {
        self.books
            .read()
            .await
            .iter()
            .map(Book::to_summary)
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Book, BookError> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| BookError::NotFound(id.to_string()))
    }

    /// Replace a book's fields. Validation runs before the existence check.
    pub async fn update(&self, id: &str, payload: BookPayload) -> Result<(), BookError> {
        let name = validate(&payload)?;

        let mut books = self.books.write().await;
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        book.apply(payload, name, OffsetDateTime::now_utc());

        tracing::debug!(book_id = %id, finished = book.finished, "book updated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), BookError> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        // `remove` shifts the tail down, keeping relative order
        books.remove(index);

        tracing::debug!(book_id = %id, total = books.len(), "book deleted");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

fn validate(payload: &BookPayload) -> Result<String, BookError> {
    let name = match payload.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(BookError::MissingName),
    };

    if let Some((read_page, page_count)) = payload.read_page_overflow() {
        return Err(BookError::ReadPageExceedsPageCount {
            read_page,
            page_count,
        });
    }

    Ok(name)
}

fn new_book_id() -> String {
    Uuid::new_v4().simple().to_string()
}
