use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum NlsqlError {
    /// User-correctable input problem (bad identifier, empty field).
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A favorite with the same `query_text` is already stored.
    #[error("A favorite with query_text already exists: {0:?}")]
    DuplicateKey(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for NlsqlError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            NlsqlError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ApiErrorObject {
                    code: "VALIDATION_ERROR".to_string(),
                    message,
                    details: None,
                },
            ),

            NlsqlError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ApiErrorObject {
                    code: "NOT_FOUND".to_string(),
                    message,
                    details: None,
                },
            ),

            NlsqlError::DuplicateKey(query_text) => (
                StatusCode::CONFLICT,
                ApiErrorObject {
                    code: "ALREADY_EXISTS".to_string(),
                    message: "A favorite with this query text already exists.".to_string(),
                    details: Some(Value::String(query_text)),
                },
            ),

            NlsqlError::DatabaseError(_)
            | NlsqlError::CsvError(_)
            | NlsqlError::IoError(_)
            | NlsqlError::RactorError(_)
            | NlsqlError::UnexpectedError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorObject {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                    details: None,
                },
            ),
        };
        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}
