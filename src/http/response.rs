//! Response bodies and error mapping.
//!
//! # Responsibilities
//! - Fixed success and not-found messages
//! - Map every failure to its status code and body
//!
//! # Design Decisions
//! - Insert failures return the raw storage message to the client
//! - Failures on read/delete paths are not described to the client; they
//!   get a plain 500 and are logged

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::storage::StorageError;

pub const CREATED: &str = "Infraction added successfully";
pub const DELETED: &str = "Infração excluída com sucesso!";
pub const PLATE_NOT_FOUND: &str = "Nenhuma infração encontrada para esta placa.";
pub const ID_NOT_FOUND: &str = "Infração não encontrada!";

/// `{"message": ...}` body.
pub fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

/// Request failures, each mapped to one response shape.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed create request; nothing was stored.
    #[error("{0}")]
    BadRequest(&'static str),

    /// No infraction carries the requested plate.
    #[error("no infraction found for plate")]
    PlateNotFound,

    /// No infraction has the requested id.
    #[error("infraction not found")]
    InfractionNotFound,

    /// The id segment is not an integer, so no DELETE route matches.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Insert failed in storage.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// Anything not handled explicitly.
    #[error("unhandled: {0}")]
    Unhandled(String),
}

impl ApiError {
    pub fn unhandled(err: impl std::fmt::Display) -> Self {
        Self::Unhandled(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(text) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": text }))).into_response()
            }
            ApiError::PlateNotFound => message(StatusCode::NOT_FOUND, PLATE_NOT_FOUND),
            ApiError::InfractionNotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": ID_NOT_FOUND }))).into_response()
            }
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "GET, HEAD")],
            )
                .into_response(),
            ApiError::Storage(err) => {
                tracing::warn!(error = %err, "Insert failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
            ApiError::Unhandled(detail) => {
                tracing::error!(error = %detail, "Unhandled request failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
