// ABOUTME: Shared API response types and error handling
// ABOUTME: Preserves the exact wire envelopes existing consumers depend on

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use serde::Serialize;

use crate::storage::StorageError;

/// Success envelope carrying a payload: `{"message": ..., "data": ...}`
#[derive(Serialize)]
pub struct DataResponse<T> {
    pub message: String,
    pub data: T,
}

/// Success envelope for deletions: `{"message": ..., "id": ...}`
#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: i64,
}

/// Error envelope: `{"error": ...}`
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert storage errors to HTTP responses. Every storage failure becomes
/// exactly one client-visible error; nothing is swallowed or retried. The
/// wire contract maps everything except a missing delete target to 400.
impl IntoResponse for StorageError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            StorageError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };

        (
            status,
            ResponseJson(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
