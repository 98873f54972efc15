use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use filedrop_protocol::ErrorResponse;
use filedrop_store::UploadError;

/// HTTP-facing error for the upload endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Upload(UploadError::PayloadTooLarge { .. }) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large")
            }
            ApiError::Upload(UploadError::StorageFailure(detail)) => {
                tracing::error!("upload storage failure: {detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_failure")
            }
            ApiError::Upload(UploadError::Unexpected(detail)) => {
                tracing::error!("unexpected upload failure: {detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, "unexpected")
            }
        };

        let body = Json(ErrorResponse {
            error: kind.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
