//! Book (catalog record) model and request/response payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult, MISSING_FIELDS};

/// A catalog record.
///
/// Books added through the API only carry `id`, `titulo` and `autor` until
/// they are updated, so `categoria` and `ano` are left out of the JSON when
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Book {
    pub id: i64,
    pub titulo: String,
    pub autor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ano: Option<i64>,
}

impl Book {
    pub fn new(id: i64, titulo: &str, autor: &str, categoria: &str, ano: i64) -> Self {
        Self {
            id,
            titulo: titulo.to_string(),
            autor: autor.to_string(),
            categoria: Some(categoria.to_string()),
            ano: Some(ano),
        }
    }
}

/// Create / update request body.
///
/// Read from any JSON value: only an object's `titulo`, `autor`, `categoria`
/// and `ano` members are picked up, so a missing field, a field of the wrong
/// type or a non-object body is reported as a validation failure rather than
/// a parse failure.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(from = "Value")]
pub struct BookInput {
    #[validate(required, length(min = 1))]
    pub titulo: Option<String>,
    #[validate(required, length(min = 1))]
    pub autor: Option<String>,
    #[validate(required, length(min = 1))]
    pub categoria: Option<String>,
    /// Publication year; `0` counts as missing
    #[validate(required)]
    pub ano: Option<i64>,
}

impl From<Value> for BookInput {
    fn from(body: Value) -> Self {
        let Value::Object(members) = body else {
            return Self::default();
        };
        let text = |key: &str| members.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            titulo: text("titulo"),
            autor: text("autor"),
            categoria: text("categoria"),
            ano: members.get("ano").and_then(whole_number),
        }
    }
}

/// `2020` and `2020.0` are the same JSON number.
fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
            .map(|n| n as i64)
    })
}

/// A fully populated, validated book payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub titulo: String,
    pub autor: String,
    pub categoria: String,
    pub ano: i64,
}

impl BookInput {
    /// Check that all four fields are present and non-empty.
    pub fn into_fields(self) -> AppResult<BookFields> {
        let missing = || AppError::Validation(MISSING_FIELDS.to_string());

        self.validate().map_err(|errors| {
            tracing::debug!("Rejected book payload: {}", errors);
            missing()
        })?;

        match (self.titulo, self.autor, self.categoria, self.ano) {
            (Some(titulo), Some(autor), Some(categoria), Some(ano)) if ano != 0 => Ok(BookFields {
                titulo,
                autor,
                categoria,
                ano,
            }),
            _ => Err(missing()),
        }
    }
}

/// `{mensagem, livro}` envelope returned by write operations
#[derive(Debug, Serialize, ToSchema)]
pub struct BookMessage {
    pub mensagem: String,
    pub livro: Book,
}

impl BookMessage {
    pub fn new(mensagem: &str, livro: Book) -> Self {
        Self {
            mensagem: mensagem.to_string(),
            livro,
        }
    }
}
