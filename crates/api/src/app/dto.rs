use serde::Deserialize;
use serde_json::Value as JsonValue;

use stockroom_store::StoredItem;

// -------------------------
// Request DTOs
// -------------------------

/// Body for the unvalidated endpoints (`/v1`, `/v6`).
///
/// Both fields are optional; whatever arrives is persisted as-is.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub quantity: Option<i64>,
}

/// Body for the endpoints whose policy decides requiredness itself
/// (`/v2`..`/v5`).
///
/// `quantity` stays raw JSON so each policy can reject bad values with its
/// own message instead of a decode failure.
#[derive(Debug, Deserialize)]
pub struct CreateItemOptionalRequest {
    pub name: Option<String>,
    pub quantity: Option<JsonValue>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn item_to_json(item: StoredItem) -> JsonValue {
    serde_json::json!({
        "id": item.id.to_string(),
        "name": item.name,
        "quantity": item.quantity,
        "created_at": item.created_at.to_rfc3339(),
    })
}

/// Uniform `{success, data, error}` wrapper used by `/v3`.
pub fn envelope_ok(data: JsonValue) -> JsonValue {
    serde_json::json!({
        "success": true,
        "data": data,
        "error": null,
    })
}

pub fn envelope_error(message: &str) -> JsonValue {
    serde_json::json!({
        "success": false,
        "data": null,
        "error": message,
    })
}
