//! JSON:API 文档类型与请求校验
//!
//! 成功负载包在 `data` 键下，错误信封见 tienda-errors

use axum::extract::Request;
use axum::http::{Method, header};
use axum::middleware::Next;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use tienda_errors::{AppError, AppResult};

/// JSON:API 媒体类型，POST/PATCH 请求必须声明
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// 成功响应信封：`{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

impl<T> Document<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// 资源对象：`{ "type", "id", "attributes" }`，id 为字符串
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource<A> {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub attributes: A,
}

impl<A> Resource<A> {
    pub fn new(kind: impl Into<String>, id: impl ToString, attributes: A) -> Self {
        Self {
            kind: kind.into(),
            id: id.to_string(),
            attributes,
        }
    }
}

/// 请求文档，宽松解析；字段级校验交给 handler
#[derive(Debug, Deserialize)]
pub struct RequestDocument<A> {
    pub data: Option<RequestResource<A>>,
}

/// 请求中的资源对象
#[derive(Debug, Deserialize)]
pub struct RequestResource<A> {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub attributes: Option<A>,
}

impl<A> RequestDocument<A> {
    /// 校验资源类型并取出 attributes
    pub fn attributes_for(self, expected_type: &str) -> AppResult<A> {
        self.data
            .filter(|d| d.kind.as_deref() == Some(expected_type))
            .and_then(|d| d.attributes)
            .ok_or_else(|| AppError::validation("Formato JSON API inválido"))
    }
}

/// 写请求的 Content-Type 校验中间件
pub async fn validate_content_type(request: Request, next: Next) -> Result<Response, AppError> {
    if matches!(*request.method(), Method::POST | Method::PATCH) {
        let declared = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if !declared.contains(MEDIA_TYPE) {
            return Err(AppError::unsupported_media_type(
                "Content-Type debe ser application/vnd.api+json",
            ));
        }
    }

    Ok(next.run(request).await)
}
