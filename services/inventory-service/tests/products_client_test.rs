//! ProductsClient 行为测试
//!
//! 用本地 stub 服务器验证重试次数、404 短路与认证头

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use inventory_service::domain::ProductGateway;
use inventory_service::infrastructure::products_client::ProductsClient;
use secrecy::Secret;
use serde_json::json;
use tienda_common::retry::RetryConfig;
use tienda_config::ProductsConfig;
use tienda_errors::AppError;

const API_KEY: &str = "secret-key-123";

#[derive(Clone)]
struct StubState {
    hits: Arc<AtomicU32>,
}

async fn stub_product(
    State(state): State<StubState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> axum::response::Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match id {
        404 => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "errors": [{ "status": "404", "title": "Not Found", "detail": "Producto no encontrado" }]
            })),
        )
            .into_response(),
        500 => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => Json(json!({
            "data": {
                "type": "products",
                "id": id.to_string(),
                "attributes": { "nombre": "Laptop", "precio": 1299.99, "descripcion": null }
            }
        }))
        .into_response(),
    }
}

async fn spawn_stub() -> (String, Arc<AtomicU32>) {
    let hits = Arc::new(AtomicU32::new(0));
    let app = Router::new()
        .route("/api/products/{id}", get(stub_product))
        .with_state(StubState { hits: hits.clone() });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), hits)
}

fn client(base_url: &str, max_attempts: u32) -> ProductsClient {
    let config = ProductsConfig {
        url: base_url.to_string(),
        timeout_secs: 5,
        max_attempts,
    };

    ProductsClient::new(&config, Secret::new(API_KEY.to_string()))
        .unwrap()
        .with_retry_config(RetryConfig::new(
            max_attempts,
            Duration::from_millis(10),
            Duration::from_millis(50),
        ))
}

#[tokio::test]
async fn test_fetch_parses_product() {
    let (base_url, hits) = spawn_stub().await;

    let product = client(&base_url, 3).fetch(1).await.unwrap();

    assert_eq!(product.id, 1);
    assert_eq!(product.nombre, "Laptop");
    assert_eq!(product.precio, "1299.99".parse().unwrap());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_not_found_short_circuits_without_retry() {
    let (base_url, hits) = spawn_stub().await;

    let err = client(&base_url, 3).fetch(404).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.detail(), "Producto no encontrado");
    // 404 是终态：只打了一次
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_server_errors_retry_until_exhaustion() {
    let (base_url, hits) = spawn_stub().await;

    let err = client(&base_url, 3).fetch(500).await.unwrap_err();

    assert!(matches!(err, AppError::ServiceUnavailable(_)));
    assert_eq!(
        err.detail(),
        "Servicio de productos no disponible después de 3 intentos"
    );
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_connection_failure_is_unavailable() {
    // 无人监听的端口：连接被拒绝也按可重试处理，最终 503
    let err = client("http://127.0.0.1:1", 2).fetch(1).await.unwrap_err();

    assert!(matches!(err, AppError::ServiceUnavailable(_)));
    assert_eq!(
        err.detail(),
        "Servicio de productos no disponible después de 2 intentos"
    );
}
