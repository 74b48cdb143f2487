//! `/v6/items`: log the request, then persist and respond after a fixed
//! delay.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};

use stockroom_core::ItemDraft;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// How long a `/v6` response is deferred after the request is logged.
pub const RESPONSE_DELAY: Duration = Duration::from_secs(2);

pub fn router() -> Router {
    Router::new().route("/items", post(create_item))
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateItemRequest>,
) -> axum::response::Response {
    tracing::info!(
        body = %serde_json::json!({ "name": &body.name, "quantity": body.quantity }),
        "POST /v6/items"
    );

    // Deferred completion: the timer yields, so other requests keep flowing
    // while this one sleeps.
    tokio::time::sleep(RESPONSE_DELAY).await;

    let draft = ItemDraft::passthrough(body.name, body.quantity);

    let stored = match services.insert_item(draft.into()).await {
        Ok(stored) => stored,
        Err(e) => return errors::store_error_to_response(&e),
    };

    (StatusCode::CREATED, Json(dto::item_to_json(stored))).into_response()
}
