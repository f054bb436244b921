//! Data models for the Biblioteca server

pub mod book;

// Re-export commonly used types
pub use book::{Book, BookFields, BookInput, BookMessage};
