//! Endpoint handlers for `/infractions`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use crate::http::request;
use crate::http::response::{self, ApiError};
use crate::http::server::AppState;
use crate::storage::{Gateway, Infraction, StorageError};

/// Run a gateway call on the blocking pool.
///
/// The outer error covers a panicked or cancelled task; the inner result is
/// the gateway's own.
async fn blocking<T, F>(gateway: &Gateway, op: F) -> Result<Result<T, StorageError>, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Gateway) -> Result<T, StorageError> + Send + 'static,
{
    let gateway = gateway.clone();
    tokio::task::spawn_blocking(move || op(&gateway))
        .await
        .map_err(ApiError::unhandled)
}

/// `POST /infractions`
pub async fn create_infraction(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let new = request::new_infraction(body)?;

    let id = blocking(&state.gateway, move |g| g.insert(&new)).await??;
    tracing::info!(id, "Infraction recorded");

    Ok(response::message(StatusCode::CREATED, response::CREATED))
}

/// `GET /infractions`
pub async fn list_infractions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Infraction>>, ApiError> {
    let rows = blocking(&state.gateway, |g| g.list_all())
        .await?
        .map_err(ApiError::unhandled)?;
    tracing::debug!(count = rows.len(), "Listed infractions");
    Ok(Json(rows))
}

/// `GET /infractions/{plate}`
pub async fn find_by_plate(
    State(state): State<AppState>,
    Path(plate): Path<String>,
) -> Result<Json<Vec<Infraction>>, ApiError> {
    let query = plate.clone();
    let rows = blocking(&state.gateway, move |g| g.list_by_plate(&query))
        .await?
        .map_err(ApiError::unhandled)?;

    if rows.is_empty() {
        tracing::debug!(plate = %plate, "No infractions for plate");
        return Err(ApiError::PlateNotFound);
    }
    tracing::debug!(plate = %plate, count = rows.len(), "Found infractions for plate");
    Ok(Json(rows))
}

/// `DELETE /infractions/{id}`
pub async fn delete_infraction(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Response, ApiError> {
    let id = request::infraction_id(&segment)?;

    let existed = blocking(&state.gateway, move |g| g.delete_by_id(id))
        .await?
        .map_err(ApiError::unhandled)?;
    if !existed {
        tracing::debug!(id, "Delete of unknown infraction");
        return Err(ApiError::InfractionNotFound);
    }

    tracing::info!(id, "Infraction deleted");
    Ok(response::message(StatusCode::OK, response::DELETED))
}
