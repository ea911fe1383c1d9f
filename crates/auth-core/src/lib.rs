//! tienda-auth-core - 服务间认证核心库
//!
//! 基于共享密钥的 X-API-Key 校验

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use secrecy::{ExposeSecret, Secret};
use sha2::{Digest, Sha256};
use tienda_errors::AppError;
use tracing::{debug, warn};

/// 服务间认证使用的请求头
pub const API_KEY_HEADER: &str = "x-api-key";

/// 共享密钥校验服务
#[derive(Clone)]
pub struct ApiKeyService {
    expected_digest: [u8; 32],
}

impl ApiKeyService {
    pub fn new(key: &Secret<String>) -> Self {
        Self {
            expected_digest: Sha256::digest(key.expose_secret().as_bytes()).into(),
        }
    }

    /// 校验请求携带的 API Key
    ///
    /// 比较定长 SHA-256 摘要而非原始密钥，使比较耗时与密钥内容无关
    pub fn verify(&self, provided: &str) -> bool {
        let digest: [u8; 32] = Sha256::digest(provided.as_bytes()).into();
        digest == self.expected_digest
    }
}

/// API Key 认证中间件
///
/// 校验失败统一返回 401，不区分缺失与错误
pub async fn auth_middleware(
    State(keys): State<ApiKeyService>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    match provided {
        Some(key) if keys.verify(key) => {
            debug!("API key accepted");
            Ok(next.run(request).await)
        }
        _ => {
            warn!("Missing or invalid API key");
            Err(AppError::unauthorized("API Key inválida o no proporcionada"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
    };
    use tienda_errors::ErrorDocument;
    use tower::ServiceExt;

    async fn handler() -> impl axum::response::IntoResponse {
        "OK"
    }

    fn test_app(key: &str) -> Router {
        let keys = ApiKeyService::new(&Secret::new(key.to_string()));
        Router::new()
            .route("/", get(handler))
            .layer(middleware::from_fn_with_state(keys, auth_middleware))
    }

    #[test]
    fn test_verify() {
        let keys = ApiKeyService::new(&Secret::new("secret-key-123".to_string()));
        assert!(keys.verify("secret-key-123"));
        assert!(!keys.verify("secret-key-124"));
        assert!(!keys.verify(""));
    }

    #[tokio::test]
    async fn test_auth_middleware_valid_key() {
        let req = HttpRequest::builder()
            .uri("/")
            .header("X-API-Key", "secret-key-123")
            .body(Body::empty())
            .unwrap();

        let response = test_app("secret-key-123").oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_auth_middleware_wrong_key() {
        let req = HttpRequest::builder()
            .uri("/")
            .header("X-API-Key", "wrong-key")
            .body(Body::empty())
            .unwrap();

        let response = test_app("secret-key-123").oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_middleware_missing_header() {
        let req = HttpRequest::builder().uri("/").body(Body::empty()).unwrap();

        let response = test_app("secret-key-123").oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_middleware_error_envelope() {
        let req = HttpRequest::builder().uri("/").body(Body::empty()).unwrap();

        let response = test_app("secret-key-123").oneshot(req).await.unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let doc: ErrorDocument = serde_json::from_slice(&body).unwrap();

        assert_eq!(doc.errors.len(), 1);
        assert_eq!(doc.errors[0].status, "401");
        assert_eq!(doc.errors[0].title, "Unauthorized");
        assert_eq!(doc.errors[0].detail, "API Key inválida o no proporcionada");
    }
}
