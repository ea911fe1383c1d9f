//! Products Service HTTP 客户端
//!
//! 固定单次超时 + 线性退避重试；404 为终态，其余失败重试到耗尽

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use tienda_auth_core::API_KEY_HEADER;
use tienda_common::jsonapi::{Document, Resource};
use tienda_common::retry::{RetryConfig, with_conditional_retry};
use tienda_config::ProductsConfig;
use tienda_errors::{AppError, AppResult};
use tracing::debug;

use crate::domain::{ProductGateway, RemoteProduct};

pub struct ProductsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Secret<String>,
    retry: RetryConfig,
}

#[derive(Debug, Deserialize)]
struct RemoteProductAttributes {
    nombre: String,
    precio: Decimal,
    descripcion: Option<String>,
}

impl ProductsClient {
    pub fn new(config: &ProductsConfig, api_key: Secret<String>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key,
            retry: RetryConfig {
                max_attempts: config.max_attempts,
                ..RetryConfig::default()
            },
        })
    }

    /// 覆盖重试配置（测试用短退避）
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn request_product(&self, producto_id: i32) -> AppResult<RemoteProduct> {
        let url = format!("{}/api/products/{}", self.base_url, producto_id);
        debug!(%url, "Fetching product");

        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| AppError::internal(format!("Products service request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found("Producto no encontrado"));
        }

        if !response.status().is_success() {
            return Err(AppError::internal(format!(
                "Products service returned {}",
                response.status()
            )));
        }

        let document: Document<Resource<RemoteProductAttributes>> = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Invalid products service response: {}", e)))?;

        let resource = document.data;
        Ok(RemoteProduct {
            id: resource.id.parse().unwrap_or(producto_id),
            nombre: resource.attributes.nombre,
            precio: resource.attributes.precio,
            descripcion: resource.attributes.descripcion,
        })
    }
}

#[async_trait]
impl ProductGateway for ProductsClient {
    async fn fetch(&self, producto_id: i32) -> AppResult<RemoteProduct> {
        with_conditional_retry(
            &self.retry,
            "fetch_product",
            || self.request_product(producto_id),
            |e| !matches!(e, AppError::NotFound(_)),
        )
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => e,
            _ => AppError::service_unavailable(format!(
                "Servicio de productos no disponible después de {} intentos",
                self.retry.max_attempts
            )),
        })
    }
}
