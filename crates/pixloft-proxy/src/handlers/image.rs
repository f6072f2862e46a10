//! Image streaming handler.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::Response,
};
use futures::StreamExt;
use pixloft_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Catches share links that carry no file id at all (`/image`, `/image/`).
pub async fn missing_file_id() -> HttpAppError {
    HttpAppError(AppError::InvalidInput("File ID is required".to_string()))
}

#[utoipa::path(
    get,
    path = "/image/{file_id}",
    tag = "images",
    params(
        ("file_id" = String, Path, description = "Store file id from the share link")
    ),
    responses(
        (status = 200, description = "Image bytes, streamed as-is from the store", content_type = "application/octet-stream"),
        (status = 400, description = "Missing file id", body = ErrorResponse),
        (status = 500, description = "Image fetch failed", body = ErrorResponse)
    )
)]
pub async fn fetch_image(
    Path(file_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, HttpAppError> {
    let file_id = file_id.trim();
    if file_id.is_empty() {
        return Err(AppError::InvalidInput("File ID is required".to_string()).into());
    }

    // Every store failure, a missing file included, is reported as a fetch
    // failure. The proxy has no 404 of its own: it either streams the image
    // or says it could not.
    let view = state.store.open_file(file_id).await.map_err(|e| {
        tracing::error!(error = %e, file_id, "Fetching image from store failed");
        AppError::Upstream(e.to_string())
    })?;

    tracing::debug!(
        file_id,
        status = view.status().as_u16(),
        content_type = ?view.content_type(),
        "Streaming image from store"
    );

    let status = view.status();
    let content_type = view.content_type().map(str::to_string);
    let body_stream = view.into_byte_stream().map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Store stream error: {}", e)))
    });

    // Content-Type comes from the store or not at all.
    let mut builder = Response::builder().status(status);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    let response = builder
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            AppError::Internal(e.to_string())
        })?;

    Ok(response)
}
