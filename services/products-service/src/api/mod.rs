//! HTTP API（路由、中间件装配）

pub mod products;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use serde::Serialize;
use tienda_auth_core::{ApiKeyService, auth_middleware};
use tienda_common::jsonapi::validate_content_type;
use tower_http::trace::TraceLayer;

use crate::domain::ProductRepository;

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
}

/// 构建服务路由
///
/// `/api` 下的路由要求 X-API-Key；/health 开放
pub fn app(state: AppState, keys: ApiKeyService) -> Router {
    let api = Router::new()
        .route(
            "/api/products",
            post(products::create_product).get(products::list_products),
        )
        .route("/api/products/{id}", get(products::get_product))
        .layer(middleware::from_fn(validate_content_type))
        .layer(middleware::from_fn_with_state(keys, auth_middleware))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    service: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        service: "products",
    })
}
