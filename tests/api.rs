//! Router tests - drive the HTTP API end to end against an in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use opensase_inventory::api::{router, AppState};
use opensase_inventory::config::Settings;
use opensase_inventory::storage::{load_products, MemoryStore};
use opensase_inventory::Inventory;
use serde_json::Value;
use tower::ServiceExt;

fn app() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let inventory = Inventory::load(store.clone(), Settings::default());
    (store, router(AppState::new(inventory, None)))
}

async fn send(app: &Router, method: Method, uri: &str, form: Option<&str>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match form {
        Some(form) => {
            req = req.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(form.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

fn ids(page: &Value) -> Vec<u64> {
    page["items"].as_array().unwrap().iter().map(|p| p["id"].as_u64().unwrap()).collect()
}

#[tokio::test]
async fn health_reports_service() {
    let (_, app) = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "opensase-inventory");
}

#[tokio::test]
async fn lists_first_page_of_samples() {
    let (_, app) = app();
    let (status, page) = send(&app, Method::GET, "/api/v1/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&page), [1, 2, 3, 4, 5]);
    assert_eq!(page["total"], 8);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["items"][1]["status"], "out-of-stock");
}

#[tokio::test]
async fn filters_by_query_params() {
    let (_, app) = app();
    let (_, page) = send(&app, Method::GET, "/api/v1/products?search=wireless&category=electronics&status=all", None).await;
    assert_eq!(ids(&page), [1, 6]);
    let (_, page) = send(&app, Method::GET, "/api/v1/products?status=out-of-stock&page=1", None).await;
    assert_eq!(ids(&page), [2, 8]);
    let (status, body) = send(&app, Method::GET, "/api/v1/products?category=garden", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown category 'garden'");
}

#[tokio::test]
async fn create_assigns_next_id_and_persists() {
    let (store, app) = app();
    let (status, product) = send(&app, Method::POST, "/api/v1/products", Some("name=X&category=accessories&price=100&stock=0")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["id"], 9);
    assert_eq!(product["status"], "out-of-stock");

    let stored = load_products(&*store).unwrap().unwrap();
    assert_eq!(stored.len(), 9);
    assert_eq!(stored[8].name(), "X");
}

#[tokio::test]
async fn update_recomputes_status() {
    let (_, app) = app();
    let (status, product) = send(
        &app,
        Method::PUT,
        "/api/v1/products/2",
        Some("name=Smart+Fitness+Watch&category=wearables&price=12999&stock=3&description=Back+in+stock"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["status"], "active");
    assert_eq!(product["description"], "Back in stock");

    let (_, fetched) = send(&app, Method::GET, "/api/v1/products/2", None).await;
    assert_eq!(fetched, product);
}

#[tokio::test]
async fn rejects_bad_input() {
    let (store, app) = app();
    let (status, body) = send(&app, Method::POST, "/api/v1/products", Some("name=X&category=electronics&price=abc&stock=1")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("price"));
    assert!(load_products(&*store).unwrap().is_none());

    let (status, _) = send(&app, Method::PUT, "/api/v1/products/42", Some("name=X&category=electronics&price=1&stock=1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_and_reset() {
    let (_, app) = app();
    let (status, _) = send(&app, Method::DELETE, "/api/v1/products/3", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, "/api/v1/products/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, "/api/v1/products/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, page) = send(&app, Method::POST, "/api/v1/products/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 8);
    assert_eq!(ids(&page), [1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn create_on_empty_catalog_conflicts() {
    let store = Arc::new(MemoryStore::new());
    opensase_inventory::storage::save_products(&*store, &[]).unwrap();
    let app = router(AppState::new(Inventory::load(store, Settings::default()), None));
    let (status, body) = send(&app, Method::POST, "/api/v1/products", Some("name=X&category=electronics&price=1&stock=1")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn orders_and_dashboard() {
    let (_, app) = app();
    let (_, orders) = send(&app, Method::GET, "/api/v1/orders?status=delivered", None).await;
    let ids: Vec<&str> = orders.as_array().unwrap().iter().map(|o| o["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["ORD-2454", "ORD-2452"]);

    let (_, all) = send(&app, Method::GET, "/api/v1/orders", None).await;
    assert_eq!(all.as_array().unwrap().len(), 5);

    let (status, summary) = send(&app, Method::GET, "/api/v1/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_products"], 8);
    assert_eq!(summary["out_of_stock"], 2);
    assert_eq!(summary["revenue"], 3498 + 12999 + 16998 + 8999);
}

#[tokio::test]
async fn malformed_requests_get_json_errors() {
    let (store, app) = app();
    let (status, body) = send(&app, Method::POST, "/api/v1/products", Some("name=X&category=electronics&price=1")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("stock"));
    assert!(load_products(&*store).unwrap().is_none());

    let (status, body) = send(&app, Method::GET, "/api/v1/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::PUT, "/api/v1/products/abc", Some("name=X&category=electronics&price=1&stock=1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::GET, "/api/v1/products?page=first", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_ids() {
    let (store, app) = app();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let form = format!("name=Item+{i}&category=electronics&price=100&stock={i}");
                send(&app, Method::POST, "/api/v1/products", Some(&form)).await
            })
        })
        .collect();
    let mut ids = Vec::new();
    for handle in handles {
        let (status, product) = handle.await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        ids.push(product["id"].as_u64().unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (9..=16).collect::<Vec<u64>>());
    assert_eq!(load_products(&*store).unwrap().unwrap().len(), 16);
}
