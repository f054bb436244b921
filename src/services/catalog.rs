//! Catalog management service

use crate::{
    error::{AppError, AppResult, CATEGORY_EMPTY},
    models::book::{Book, BookInput},
    normalize::normalize_category,
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Every book, in insertion order
    pub async fn list_books(&self) -> Vec<Book> {
        self.repository.books.list_all().await
    }

    pub async fn count_books(&self) -> usize {
        self.repository.books.count().await
    }

    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.find_by_id(id).await.inspect_err(|_| {
            tracing::debug!("Book id={} not found", id);
        })
    }

    /// Books in `categoria`, ignoring case and accents.
    ///
    /// An empty result is reported as not found.
    pub async fn books_by_category(&self, categoria: &str) -> AppResult<Vec<Book>> {
        let key = normalize_category(categoria);
        let books = self.repository.books.find_by_category(&key).await;

        if books.is_empty() {
            tracing::debug!("No book in category '{}' (key '{}')", categoria, key);
            return Err(AppError::NotFound(CATEGORY_EMPTY.to_string()));
        }
        Ok(books)
    }

    pub async fn create_book(&self, input: BookInput) -> AppResult<Book> {
        let book = self.repository.books.create(input).await?;
        tracing::info!("Catalog: created book id={} '{}'", book.id, book.titulo);
        Ok(book)
    }

    pub async fn update_book(&self, id: i64, input: BookInput) -> AppResult<Book> {
        let book = self.repository.books.update(id, input).await?;
        tracing::info!("Catalog: updated book id={}", book.id);
        Ok(book)
    }

    pub async fn delete_book(&self, id: i64) -> AppResult<Book> {
        let book = self.repository.books.delete(id).await?;
        tracing::info!("Catalog: removed book id={} '{}'", book.id, book.titulo);
        Ok(book)
    }
}
