use std::io;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use futures_util::TryStreamExt;
use tokio_util::io::StreamReader;

use filedrop_protocol::UploadResponse;

use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field the upload is expected in.
const FILE_FIELD: &str = "file";

/// Handles `POST /upload`.
///
/// Streams the `file` field through the upload coordinator without
/// buffering the body, then broadcasts the completion event to every
/// connected subscriber. The uploader gets a definitive outcome either
/// way; broadcast delivery problems never surface here.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let client_name = field.file_name().map(str::to_owned);
        let source = StreamReader::new(Box::pin(field.map_err(io::Error::other)));

        let stored = state
            .coordinator
            .handle(client_name.as_deref(), source)
            .await?;

        state
            .bridge
            .upload_completed(&stored.name, stored.size_bytes)
            .await;

        return Ok(Json(UploadResponse {
            message: "upload complete".into(),
            file_name: stored.name,
            file_size: stored.size_bytes,
        }));
    }

    Err(ApiError::BadRequest(format!(
        "missing \"{FILE_FIELD}\" field"
    )))
}
