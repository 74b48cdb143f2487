//! `/v5/items`: require a name; trim and title-case it, default the
//! quantity to 1.

use std::sync::Arc;

use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};

use stockroom_core::ItemDraft;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/items", post(create_item))
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateItemOptionalRequest>,
) -> axum::response::Response {
    let draft = match ItemDraft::normalized(body.name.as_deref(), body.quantity.as_ref()) {
        Ok(draft) => draft,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    let stored = match services.insert_item(draft.into()).await {
        Ok(stored) => stored,
        Err(e) => return errors::store_error_to_response(&e),
    };

    (StatusCode::CREATED, Json(dto::item_to_json(stored))).into_response()
}
