use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_core::DomainError;
use stockroom_store::StoreError;

use crate::app::dto;

/// Message returned for any persistence failure, regardless of cause.
pub const STORAGE_FAILURE: &str = "Failed to create item";

pub fn domain_error_to_response(err: &DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg.as_str()),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, msg.as_str()),
    }
}

/// Map a store failure to the opaque 500 response.
///
/// The cause is logged here and never surfaced to the caller.
pub fn store_error_to_response(err: &StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "item store operation failed");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, STORAGE_FAILURE)
}

/// `/v3` variant of the storage-failure mapping, wrapped in the envelope.
pub fn store_error_to_envelope_response(err: &StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "item store operation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(dto::envelope_error(STORAGE_FAILURE)),
    )
        .into_response()
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
        })),
    )
        .into_response()
}
