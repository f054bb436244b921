//! In-memory book store.
//!
//! Books are kept in insertion order behind a single lock, taken once per
//! operation so concurrent writers never interleave.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::IdStrategy,
    error::{AppError, AppResult, BOOK_NOT_FOUND},
    models::book::{Book, BookInput},
    normalize::normalize_category,
};

/// The three records every fresh catalog starts with.
pub fn sample_books() -> Vec<Book> {
    vec![
        Book::new(1, "Clean Code", "Robert C. Martin", "Programação", 2008),
        Book::new(
            2,
            "O Programador Pragmático",
            "Andrew Hunt e David Thomas",
            "Programação",
            1999,
        ),
        Book::new(
            3,
            "Design Patterns",
            "Erich Gamma, Richard Helm, Ralph Johnson, John Vlissides",
            "Programação",
            1994,
        ),
    ]
}

struct Shelf {
    books: Vec<Book>,
    /// Highest id ever held, including removed books
    highest_id: i64,
}

impl Shelf {
    fn position(&self, id: i64) -> AppResult<usize> {
        self.books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
    }

    fn next_id(&self, strategy: IdStrategy) -> i64 {
        match strategy {
            IdStrategy::Length => self.books.len() as i64 + 1,
            IdStrategy::Monotonic => self.highest_id + 1,
        }
    }
}

#[derive(Clone)]
pub struct BooksRepository {
    shelf: Arc<Mutex<Shelf>>,
    id_strategy: IdStrategy,
}

impl BooksRepository {
    pub fn new(books: Vec<Book>, id_strategy: IdStrategy) -> Self {
        let highest_id = books.iter().map(|book| book.id).max().unwrap_or(0);
        Self {
            shelf: Arc::new(Mutex::new(Shelf { books, highest_id })),
            id_strategy,
        }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// All books, in insertion order.
    pub async fn list_all(&self) -> Vec<Book> {
        self.shelf.lock().await.books.clone()
    }

    pub async fn count(&self) -> usize {
        self.shelf.lock().await.books.len()
    }

    /// First book carrying `id`.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Book> {
        let shelf = self.shelf.lock().await;
        let index = shelf.position(id)?;
        Ok(shelf.books[index].clone())
    }

    /// Books whose folded category equals `normalized`.
    ///
    /// `normalized` must already be folded with [`normalize_category`]; stored
    /// categories are folded on every comparison. Books without a category
    /// never match.
    pub async fn find_by_category(&self, normalized: &str) -> Vec<Book> {
        let shelf = self.shelf.lock().await;
        shelf
            .books
            .iter()
            .filter(|book| {
                book.categoria
                    .as_deref()
                    .is_some_and(|categoria| normalize_category(categoria) == normalized)
            })
            .cloned()
            .collect()
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Append a new book.
    ///
    /// All four fields are required, but only the title and author are kept
    /// on the stored record.
    pub async fn create(&self, input: BookInput) -> AppResult<Book> {
        let fields = input.into_fields()?;

        let mut shelf = self.shelf.lock().await;
        let book = Book {
            id: shelf.next_id(self.id_strategy),
            titulo: fields.titulo,
            autor: fields.autor,
            categoria: None,
            ano: None,
        };
        shelf.highest_id = shelf.highest_id.max(book.id);
        shelf.books.push(book.clone());
        Ok(book)
    }

    /// Overwrite every field of the first book carrying `id`.
    ///
    /// An unknown id is reported before any field validation.
    pub async fn update(&self, id: i64, input: BookInput) -> AppResult<Book> {
        let mut shelf = self.shelf.lock().await;
        let index = shelf.position(id)?;
        let fields = input.into_fields()?;

        let book = &mut shelf.books[index];
        book.titulo = fields.titulo;
        book.autor = fields.autor;
        book.categoria = Some(fields.categoria);
        book.ano = Some(fields.ano);
        Ok(book.clone())
    }

    /// Remove the first book carrying `id`, keeping the others in order.
    pub async fn delete(&self, id: i64) -> AppResult<Book> {
        let mut shelf = self.shelf.lock().await;
        let index = shelf.position(id)?;
        Ok(shelf.books.remove(index))
    }
}
