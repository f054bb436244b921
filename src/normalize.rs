//! Text folding used to compare categories.
//!
//! "Programação", "programacao" and "PROGRAMAÇÃO" all fold to the same key:
//! the text is canonically decomposed (NFD), every combining mark is dropped
//! and the remainder is lowercased.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Fold `text` into its case and accent insensitive comparison key.
pub fn normalize_category(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
