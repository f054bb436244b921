//! Repository layer holding the catalog in process memory

pub mod books;

use crate::config::CatalogConfig;

/// Main repository struct; clones share the same underlying catalog
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a repository, seeded with the sample books when configured
    pub fn new(config: &CatalogConfig) -> Self {
        let books = if config.seed {
            books::sample_books()
        } else {
            Vec::new()
        };

        Self {
            books: books::BooksRepository::new(books, config.id_strategy),
        }
    }
}
