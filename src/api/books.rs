//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};

use crate::{
    error::{AppError, AppResult, ErrorResponse, BOOK_NOT_FOUND},
    models::book::{Book, BookInput, BookMessage},
    AppState,
};

use super::AppJson;

const WELCOME_PAGE: &str = r#"
    <h1>Biblioteca Online</h1>
    <p>Use os endpoints:</p>
    <ul>
        <li>GET /livros → lista os livros</li>
        <li>GET /livros/:id → mostra um livro pelo id</li>
        <li>GET /livros/categoria/:categoria → lista os livros de uma categoria (sem diferenciar acentos ou maiúsculas)</li>
        <li>POST /livros → adiciona um livro (JSON: {titulo, autor, categoria, ano})</li>
        <li>PUT /livros/:id → atualiza um livro (JSON: {titulo, autor, categoria, ano})</li>
        <li>DELETE /livros/:id → remove livro pelo id</li>
    </ul>
    <p>Documentação: <a href="/swagger-ui">/swagger-ui</a></p>
"#;

/// Parse a path id the lenient way: leading whitespace, an optional sign,
/// then as many decimal digits as are present ("4abc" is 4).
pub fn parse_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    let value = unsigned[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

fn book_id(raw: &str) -> AppResult<i64> {
    parse_id(raw).ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
}

/// Welcome page listing the endpoints
#[utoipa::path(
    get,
    path = "/",
    tag = "livros",
    responses(
        (status = 200, description = "HTML welcome page", content_type = "text/html", body = String)
    )
)]
pub async fn welcome() -> Html<&'static str> {
    Html(WELCOME_PAGE)
}

/// List all books
#[utoipa::path(
    get,
    path = "/livros",
    tag = "livros",
    responses(
        (status = 200, description = "Every book, in insertion order", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> Json<Vec<Book>> {
    Json(state.services.catalog.list_books().await)
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/livros/{id}",
    tag = "livros",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(book_id(&id)?).await?;
    Ok(Json(book))
}

/// List books of a category, ignoring case and accents
#[utoipa::path(
    get,
    path = "/livros/categoria/{categoria}",
    tag = "livros",
    params(
        ("categoria" = String, Path, description = "Category name, e.g. programacao")
    ),
    responses(
        (status = 200, description = "Books in the category", body = Vec<Book>),
        (status = 404, description = "No book in this category", body = ErrorResponse)
    )
)]
pub async fn books_by_category(
    State(state): State<AppState>,
    Path(categoria): Path<String>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.books_by_category(&categoria).await?;
    Ok(Json(books))
}

/// Add a new book
#[utoipa::path(
    post,
    path = "/livros",
    tag = "livros",
    request_body = BookInput,
    responses(
        (status = 201, description = "Book added", body = BookMessage),
        (status = 400, description = "Missing field or malformed JSON", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    AppJson(input): AppJson<BookInput>,
) -> AppResult<(StatusCode, Json<BookMessage>)> {
    let book = state.services.catalog.create_book(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(BookMessage::new("Livro adicionado com sucesso", book)),
    ))
}

/// Replace every field of a book
#[utoipa::path(
    put,
    path = "/livros/{id}",
    tag = "livros",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body = BookInput,
    responses(
        (status = 200, description = "Book updated", body = BookMessage),
        (status = 400, description = "Missing field or malformed JSON", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<BookInput>,
) -> AppResult<Json<BookMessage>> {
    let book = state.services.catalog.update_book(book_id(&id)?, input).await?;
    Ok(Json(BookMessage::new("Livro atualizado com sucesso", book)))
}

/// Remove a book
#[utoipa::path(
    delete,
    path = "/livros/{id}",
    tag = "livros",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book removed", body = BookMessage),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookMessage>> {
    let book = state.services.catalog.delete_book(book_id(&id)?).await?;
    Ok(Json(BookMessage::new("Livro removido", book)))
}
