//! HTTP handlers for `/books`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use bookshelf_http::{
    error::{route_not_found, AppError},
    response::Envelope,
};

use super::models::{BookDetail, BookList, BookPayload, CreatedBook};
use super::service::{BookError, BookService};

const BOOK_ADDED: &str = "Buku berhasil ditambahkan";
const BOOK_UPDATED: &str = "Buku berhasil diperbarui";
const BOOK_DELETED: &str = "Buku berhasil dihapus";

/// The operation a failure happened in; each words its errors differently.
#[derive(Debug, Clone, Copy)]
enum Action {
    Add,
    Fetch,
    Update,
    Delete,
}

impl Action {
    fn failure_prefix(self) -> &'static str {
        match self {
            Action::Add => "Gagal menambahkan buku",
            Action::Update => "Gagal memperbarui buku",
            Action::Delete => "Buku gagal dihapus",
            Action::Fetch => "Buku tidak ditemukan",
        }
    }

    fn reject(self, error: BookError) -> AppError {
        match error {
            BookError::MissingName => AppError::validation(
                "missing_name",
                format!("{}. Mohon isi nama buku", self.failure_prefix()),
            ),
            BookError::ReadPageExceedsPageCount { .. } => AppError::validation(
                "read_page_exceeds_page_count",
                format!(
                    "{}. readPage tidak boleh lebih besar dari pageCount",
                    self.failure_prefix()
                ),
            ),
            BookError::NotFound(_) => match self {
                Action::Fetch => AppError::not_found(self.failure_prefix()),
                _ => AppError::not_found(format!("{}. Id tidak ditemukan", self.failure_prefix())),
            },
        }
    }
}

/// Routes for the books module, bound to `service`.
pub fn router(service: BookService) -> Router {
    Router::new()
        .route(
            "/books",
            post(create_book).get(list_books).fallback(route_not_found),
        )
        .route(
            "/books/{book_id}",
            get(get_book)
                .put(update_book)
                .delete(delete_book)
                .fallback(route_not_found),
        )
        .with_state(service)
}

async fn create_book(
    State(service): State<BookService>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<CreatedBook>>), AppError> {
    let Json(payload) = payload?;

    let book_id = service
        .create(payload)
        .await
        .map_err(|e| Action::Add.reject(e))?;

    tracing::info!(book_id = %book_id, "book added");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(CreatedBook { book_id }).with_message(BOOK_ADDED)),
    ))
}

async fn list_books(State(service): State<BookService>) -> Json<Envelope<BookList>> {
    let books = service.list().await;
    Json(Envelope::data(BookList { books }))
}

async fn get_book(
    State(service): State<BookService>,
    book_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Envelope<BookDetail>>, AppError> {
    let Path(book_id) = book_id?;
    let book = service
        .get(&book_id)
        .await
        .map_err(|e| Action::Fetch.reject(e))?;

    Ok(Json(Envelope::data(BookDetail { book })))
}

async fn update_book(
    State(service): State<BookService>,
    book_id: Result<Path<String>, PathRejection>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<Json<Envelope>, AppError> {
    let Path(book_id) = book_id?;
    let Json(payload) = payload?;

    service
        .update(&book_id, payload)
        .await
        .map_err(|e| Action::Update.reject(e))?;

    tracing::info!(book_id = %book_id, "book updated");
    Ok(Json(Envelope::message(BOOK_UPDATED)))
}

async fn delete_book(
    State(service): State<BookService>,
    book_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Envelope>, AppError> {
    let Path(book_id) = book_id?;
    service
        .delete(&book_id)
        .await
        .map_err(|e| Action::Delete.reject(e))?;

    tracing::info!(book_id = %book_id, "book deleted");
    Ok(Json(Envelope::message(BOOK_DELETED)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(error: AppError) -> String {
        match error {
            AppError::Validation { message, .. } | AppError::NotFound { message, .. } => message,
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn add_failures_use_add_wording() {
        assert_eq!(
            message(Action::Add.reject(BookError::MissingName)),
            "Gagal menambahkan buku. Mohon isi nama buku"
        );
        assert_eq!(
            message(Action::Add.reject(BookError::ReadPageExceedsPageCount {
                read_page: 2,
                page_count: 1
            })),
            "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
        );
    }

    #[test]
    fn not_found_wording_depends_on_action() {
        let missing = || BookError::NotFound("x".to_string());
        assert_eq!(message(Action::Fetch.reject(missing())), "Buku tidak ditemukan");
        assert_eq!(
            message(Action::Update.reject(missing())),
            "Gagal memperbarui buku. Id tidak ditemukan"
        );
        assert_eq!(
            message(Action::Delete.reject(missing())),
            "Buku gagal dihapus. Id tidak ditemukan"
        );
    }
}
