//! HTTP API over the inventory.

use std::sync::Arc;

use axum::extract::rejection::{FormRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, warn};

use crate::domain::value_objects::UnknownVariant;
use crate::domain::{Category, Order, OrderStatus, Product, ProductEvent, ProductForm, ProductId, ProductStatus};
use crate::summary::Summary;
use crate::view::{CatalogQuery, Filter, Page};
use crate::{Inventory, InventoryError};

pub const EVENTS_SUBJECT: &str = "inventory.products";

#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<Mutex<Inventory>>,
    pub nats: Option<async_nats::Client>,
}

impl AppState {
    pub fn new(inventory: Inventory, nats: Option<async_nats::Client>) -> Self {
        Self { inventory: Arc::new(Mutex::new(inventory)), nats }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "opensase-inventory"})) }))
        .route("/api/v1/products", get(list_products).post(create_product))
        .route("/api/v1/products/reset", post(reset_products))
        .route("/api/v1/products/:id", get(get_product).put(update_product).delete(delete_product))
        .route("/api/v1/orders", get(list_orders))
        .route("/api/v1/dashboard", get(dashboard))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()))
        .with_state(state)
}

#[derive(Debug)]
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({"error": self.1}))).into_response()
    }
}

impl From<InventoryError> for ApiError {
    fn from(e: InventoryError) -> Self {
        let status = match &e {
            InventoryError::NotFound(_) => StatusCode::NOT_FOUND,
            InventoryError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            InventoryError::EmptyCollection | InventoryError::IdSpaceExhausted(_) => StatusCode::CONFLICT,
            InventoryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self(status, e.to_string())
    }
}

// Extractor rejections keep axum's status code but answer with the JSON error body.
macro_rules! impl_from_rejection {
    ($($rejection:ty),*) => {$(
        impl From<$rejection> for ApiError {
            fn from(r: $rejection) -> Self { Self(r.status(), r.body_text()) }
        }
    )*};
}

impl_from_rejection!(FormRejection, PathRejection, QueryRejection);

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
}

impl ProductListParams {
    pub fn into_query(self) -> ApiResult<CatalogQuery> {
        let bad_request = |e: UnknownVariant| ApiError(StatusCode::BAD_REQUEST, e.to_string());
        Ok(CatalogQuery {
            search: self.search.unwrap_or_default(),
            category: Filter::<Category>::parse(self.category.as_deref().unwrap_or_default()).map_err(bad_request)?,
            status: Filter::<ProductStatus>::parse(self.status.as_deref().unwrap_or_default()).map_err(bad_request)?,
            page: self.page.unwrap_or(1).max(1),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OrderListParams {
    pub status: Option<String>,
}

async fn list_products(State(s): State<AppState>, params: Result<Query<ProductListParams>, QueryRejection>) -> ApiResult<Json<Page<Product>>> {
    let Query(p) = params?;
    let query = p.into_query()?;
    Ok(Json(s.inventory.lock().await.products_page(&query)))
}

async fn get_product(State(s): State<AppState>, id: Result<Path<u64>, PathRejection>) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    let inventory = s.inventory.lock().await;
    Ok(Json(inventory.product(ProductId::new(id))?.clone()))
}

async fn create_product(State(s): State<AppState>, form: Result<Form<ProductForm>, FormRejection>) -> ApiResult<(StatusCode, Json<Product>)> {
    let Form(form) = form?;
    let product = mutate(&s, move |inventory| inventory.save_product(None, form)).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(s): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    form: Result<Form<ProductForm>, FormRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    let Form(form) = form?;
    let product = mutate(&s, move |inventory| inventory.save_product(Some(ProductId::new(id)), form)).await?;
    Ok(Json(product))
}

async fn delete_product(State(s): State<AppState>, id: Result<Path<u64>, PathRejection>) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    mutate(&s, move |inventory| inventory.delete_product(ProductId::new(id))).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reset_products(State(s): State<AppState>) -> ApiResult<Json<Page<Product>>> {
    let page = mutate(&s, |inventory| {
        inventory.reset()?;
        Ok(inventory.products_page(&CatalogQuery::default()))
    })
    .await?;
    Ok(Json(page))
}

async fn list_orders(State(s): State<AppState>, params: Result<Query<OrderListParams>, QueryRejection>) -> ApiResult<Json<Vec<Order>>> {
    let Query(p) = params?;
    let status = Filter::<OrderStatus>::parse(p.status.as_deref().unwrap_or_default())
        .map_err(|e| ApiError(StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(Json(s.inventory.lock().await.orders_with_status(status)))
}

async fn dashboard(State(s): State<AppState>) -> Json<Summary> {
    Json(s.inventory.lock().await.summary())
}

/// Runs a catalog mutation on the blocking pool, since it ends in a
/// synchronous store write, then publishes the events it raised.
async fn mutate<T, F>(s: &AppState, f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut Inventory) -> crate::Result<T> + Send + 'static,
{
    let inventory = s.inventory.clone();
    let (out, events) = tokio::task::spawn_blocking(move || -> crate::Result<(T, Vec<ProductEvent>)> {
        let mut inventory = inventory.blocking_lock();
        let out = f(&mut *inventory)?;
        Ok((out, inventory.take_events()))
    })
    .await
    .map_err(|e| ApiError(StatusCode::INTERNAL_SERVER_ERROR, format!("inventory task failed: {e}")))??;
    publish(s, events).await;
    Ok(out)
}

// Called with the inventory lock released.
async fn publish(s: &AppState, events: Vec<ProductEvent>) {
    let Some(client) = s.nats.as_ref() else {
        for event in &events {
            debug!(?event, "No event bus configured, dropping event");
        }
        return;
    };
    for event in events {
        let payload = match serde_json::to_vec(&event) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to encode product event");
                continue;
            }
        };
        if let Err(e) = client.publish(EVENTS_SUBJECT.to_string(), payload.into()).await {
            warn!(error = %e, product_id = ?event.product_id(), "Failed to publish product event");
        }
    }
}
