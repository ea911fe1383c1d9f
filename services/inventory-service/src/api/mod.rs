//! HTTP API（路由、中间件装配）

pub mod inventory;
pub mod purchases;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use serde::Serialize;
use tienda_auth_core::{ApiKeyService, auth_middleware};
use tienda_common::jsonapi::validate_content_type;
use tower_http::trace::TraceLayer;

use crate::application::PurchaseService;
use crate::domain::{InventoryRepository, ProductGateway};

#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<dyn InventoryRepository>,
    pub products: Arc<dyn ProductGateway>,
    pub purchases: PurchaseService,
}

impl AppState {
    pub fn new(inventory: Arc<dyn InventoryRepository>, products: Arc<dyn ProductGateway>) -> Self {
        let purchases = PurchaseService::new(products.clone(), inventory.clone());
        Self {
            inventory,
            products,
            purchases,
        }
    }
}

/// 构建服务路由
///
/// `/api` 下的路由要求 X-API-Key；/health 开放
pub fn app(state: AppState, keys: ApiKeyService) -> Router {
    let api = Router::new()
        .route(
            "/api/inventory/{producto_id}",
            get(inventory::get_inventory).patch(inventory::update_inventory),
        )
        .route("/api/purchases", post(purchases::create_purchase))
        .route(
            "/api/purchases/history/{producto_id}",
            get(purchases::purchase_history),
        )
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
        service: "inventory",
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{
        InventoryRecord, MockInventoryRepository, MockProductGateway, RemoteProduct,
    };
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use secrecy::Secret;
    use tower::ServiceExt;

    pub const API_KEY: &str = "secret-key-123";

    pub fn laptop() -> RemoteProduct {
        RemoteProduct {
            id: 1,
            nombre: "Laptop".to_string(),
            precio: "1299.99".parse().unwrap(),
            descripcion: Some("Laptop gamer".to_string()),
        }
    }

    pub fn stock(cantidad: i32) -> InventoryRecord {
        InventoryRecord {
            producto_id: 1,
            cantidad,
            updated_at: Utc::now(),
        }
    }

    pub fn test_app(products: MockProductGateway, inventory: MockInventoryRepository) -> Router {
        let state = AppState::new(Arc::new(inventory), Arc::new(products));
        let keys = ApiKeyService::new(&Secret::new(API_KEY.to_string()));
        app(state, keys)
    }

    pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_api_requires_key() {
        let request = Request::builder()
            .uri("/api/inventory/1")
            .body(Body::empty())
            .unwrap();

        let response = test_app(MockProductGateway::new(), MockInventoryRepository::new())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["errors"][0]["detail"], "API Key inválida o no proporcionada");
    }

    #[tokio::test]
    async fn test_health_is_open() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = test_app(MockProductGateway::new(), MockInventoryRepository::new())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "inventory");
    }
}
