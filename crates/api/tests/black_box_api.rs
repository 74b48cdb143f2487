use std::sync::Arc;
use std::time::Instant;

use reqwest::StatusCode;
use serde_json::json;

use stockroom_api::app::routes::v6::RESPONSE_DELAY;
use stockroom_api::app::services::AppServices;
use stockroom_store::InMemoryItemStore;

struct TestServer {
    base_url: String,
    store: Arc<InMemoryItemStore>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port and
        // keep a handle on the store for direct inspection.
        let store = Arc::new(InMemoryItemStore::new());
        let app = stockroom_api::app::build_app(AppServices::with_store(store.clone()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            store,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_endpoint_responds() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn v1_creates_item_from_well_formed_body() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/v1/items", srv.base_url))
        .json(&json!({ "name": "Widget", "quantity": 3 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["name"], "Widget");
    assert_eq!(body["quantity"], 3);
    assert!(!body["id"].as_str().unwrap().is_empty());

    let all = srv.store.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name.as_deref(), Some("Widget"));
    assert_eq!(all[0].quantity, Some(3));
}

#[tokio::test]
async fn v1_persists_missing_name_as_null() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/v1/items", srv.base_url))
        .json(&json!({ "quantity": 3 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["name"].is_null());
    assert_eq!(body["quantity"], 3);

    let all = srv.store.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, None);
    assert_eq!(all[0].quantity, Some(3));
}

#[tokio::test]
async fn v1_persists_missing_quantity_as_null() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/v1/items", srv.base_url))
        .json(&json!({ "name": "Widget" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["quantity"].is_null());
    assert_eq!(srv.store.all()[0].quantity, None);
}

#[tokio::test]
async fn v2_rejects_missing_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for body in [
        json!({ "quantity": 5 }),
        json!({ "name": "Bolt" }),
        json!({ "name": "", "quantity": 5 }),
        json!({ "name": "Bolt", "quantity": null }),
    ] {
        let res = client
            .post(format!("{}/v2/items", srv.base_url))
            .json(&body)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let payload: serde_json::Value = res.json().await.unwrap();
        assert_eq!(payload["error"], "Name and quantity are required");
    }

    assert!(srv.store.all().is_empty());
}

#[tokio::test]
async fn v2_rejects_negative_and_non_numeric_quantity() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for body in [
        json!({ "name": "Bolt", "quantity": -1 }),
        json!({ "name": "Bolt", "quantity": "five" }),
    ] {
        let res = client
            .post(format!("{}/v2/items", srv.base_url))
            .json(&body)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let payload: serde_json::Value = res.json().await.unwrap();
        assert_eq!(payload["error"], "Quantity must be a positive number");
    }

    assert!(srv.store.all().is_empty());
}

#[tokio::test]
async fn v2_accepts_zero_quantity() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/v2/items", srv.base_url))
        .json(&json!({ "name": "Bolt", "quantity": 0 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["quantity"], 0);
}

#[tokio::test]
async fn v3_envelope_wraps_success_and_failure() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Success: data present, error null.
    let res = client
        .post(format!("{}/v3/items", srv.base_url))
        .json(&json!({ "name": "Bolt", "quantity": 5 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    let keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys.len(), 3);
    for key in ["success", "data", "error"] {
        assert!(keys.iter().any(|k| k == key), "missing key {key}");
    }
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Bolt");
    assert_eq!(body["data"]["quantity"], 5);
    assert!(body["error"].is_null());

    // Failure: error present, data null.
    let res = client
        .post(format!("{}/v3/items", srv.base_url))
        .json(&json!({ "name": "Bolt" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body.as_object().unwrap().len(), 3);
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
    assert_eq!(body["error"], "Name and quantity are required");
}

#[tokio::test]
async fn v3_envelope_wraps_non_numeric_quantity() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/v3/items", srv.base_url))
        .json(&json!({ "name": "Bolt", "quantity": "heavy" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body.as_object().unwrap().len(), 3);
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
    assert_eq!(body["error"], "Quantity must be a number");
    assert!(srv.store.all().is_empty());
}

#[tokio::test]
async fn v4_rejects_duplicate_name() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/v4/items", srv.base_url))
        .json(&json!({ "name": "Bolt", "quantity": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/v4/items", srv.base_url))
        .json(&json!({ "name": "Bolt", "quantity": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let payload: serde_json::Value = res.json().await.unwrap();
    assert_eq!(payload["error"], "Item already exists");

    let bolts: Vec<_> = srv
        .store
        .all()
        .into_iter()
        .filter(|item| item.name.as_deref() == Some("Bolt"))
        .collect();
    assert_eq!(bolts.len(), 1);
}

#[tokio::test]
async fn v4_requires_both_fields() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/v4/items", srv.base_url))
        .json(&json!({ "name": "Bolt" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: serde_json::Value = res.json().await.unwrap();
    assert_eq!(payload["error"], "Name and quantity are required");
    assert!(srv.store.all().is_empty());
}

#[tokio::test]
async fn v5_defaults_quantity_and_formats_name() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/v5/items", srv.base_url))
        .json(&json!({ "name": " hex nut " }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["name"], "Hex Nut");
    assert_eq!(body["quantity"], 1);

    let all = srv.store.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name.as_deref(), Some("Hex Nut"));
    assert_eq!(all[0].quantity, Some(1));
}

#[tokio::test]
async fn v5_keeps_explicit_quantity() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/v5/items", srv.base_url))
        .json(&json!({ "name": "bolt", "quantity": 7 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["name"], "Bolt");
    assert_eq!(body["quantity"], 7);
}

#[tokio::test]
async fn v5_requires_name() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/v5/items", srv.base_url))
        .json(&json!({ "quantity": 2 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: serde_json::Value = res.json().await.unwrap();
    assert_eq!(payload["error"], "Name is required");
    assert!(srv.store.all().is_empty());
}

#[tokio::test]
async fn v6_defers_response_and_persists() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let started = Instant::now();
    let res = client
        .post(format!("{}/v6/items", srv.base_url))
        .json(&json!({ "name": "Widget", "quantity": 2 }))
        .send()
        .await
        .unwrap();

    assert!(started.elapsed() >= RESPONSE_DELAY);
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["name"], "Widget");
    assert_eq!(body["quantity"], 2);

    let all = srv.store.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name.as_deref(), Some("Widget"));
}

#[tokio::test]
async fn v6_delay_does_not_block_other_requests() {
    let srv = TestServer::spawn().await;

    let base_url = srv.base_url.clone();
    let deferred = tokio::spawn(async move {
        reqwest::Client::new()
            .post(format!("{}/v6/items", base_url))
            .json(&json!({ "name": "Slow", "quantity": 1 }))
            .send()
            .await
            .unwrap()
            .status()
    });

    // Let the deferred request reach its sleep.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/v1/items", srv.base_url))
        .json(&json!({ "name": "Fast", "quantity": 1 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    // The deferred request must still be sleeping when the fast one is done.
    assert!(!deferred.is_finished());

    assert_eq!(deferred.await.unwrap(), StatusCode::CREATED);
}
