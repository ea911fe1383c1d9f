//! tienda-errors - 统一错误处理
//!
//! 错误分类与 JSON:API 错误信封

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unsupported_media_type(msg: impl Into<String>) -> Self {
        Self::UnsupportedMediaType(msg.into())
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Conflict(_) => 409,
            Self::UnsupportedMediaType(_) => 415,
            Self::ServiceUnavailable(_) => 503,
            Self::Internal(_) => 500,
            Self::Database(_) => 500,
        }
    }

    /// 错误信封的 title 字段
    pub fn title(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Not Found",
            Self::Validation(_) => "Bad Request",
            Self::Unauthorized(_) => "Unauthorized",
            Self::Conflict(_) => "Conflict",
            Self::UnsupportedMediaType(_) => "Unsupported Media Type",
            Self::ServiceUnavailable(_) => "Service Unavailable",
            Self::Internal(_) => "Internal Server Error",
            Self::Database(_) => "Internal Server Error",
        }
    }

    /// 错误信封的 detail 字段（原始消息，不带变体前缀）
    pub fn detail(&self) -> &str {
        match self {
            Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Unauthorized(msg)
            | Self::Conflict(msg)
            | Self::UnsupportedMediaType(msg)
            | Self::ServiceUnavailable(msg)
            | Self::Internal(msg)
            | Self::Database(msg) => msg,
        }
    }

    /// 转换为 JSON:API 错误条目
    pub fn to_error_object(&self) -> ErrorObject {
        ErrorObject {
            status: self.status_code().to_string(),
            title: self.title().to_string(),
            detail: self.detail().to_string(),
        }
    }
}

/// JSON:API 错误条目
///
/// 客户端契约：`status` 为字符串形式的状态码
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorObject {
    pub status: String,
    pub title: String,
    pub detail: String,
}

/// JSON:API 错误信封：`{ "errors": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

impl ErrorDocument {
    pub fn single(error: ErrorObject) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorDocument::single(self.to_error_object());
        (status, Json(body)).into_response()
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::not_found("x").status_code(), 404);
        assert_eq!(AppError::validation("x").status_code(), 400);
        assert_eq!(AppError::unauthorized("x").status_code(), 401);
        assert_eq!(AppError::conflict("x").status_code(), 409);
        assert_eq!(AppError::unsupported_media_type("x").status_code(), 415);
        assert_eq!(AppError::service_unavailable("x").status_code(), 503);
        assert_eq!(AppError::internal("x").status_code(), 500);
        assert_eq!(AppError::database("x").status_code(), 500);
    }

    #[test]
    fn test_detail_strips_variant_prefix() {
        let err = AppError::not_found("Producto no encontrado");
        assert_eq!(err.detail(), "Producto no encontrado");
        assert_eq!(err.to_string(), "Not found: Producto no encontrado");
    }

    #[test]
    fn test_error_envelope_shape() {
        let err = AppError::conflict("Inventario insuficiente. Disponible: 1, Solicitado: 5");
        let doc = ErrorDocument::single(err.to_error_object());
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["errors"][0]["status"], "409");
        assert_eq!(value["errors"][0]["title"], "Conflict");
        assert_eq!(
            value["errors"][0]["detail"],
            "Inventario insuficiente. Disponible: 1, Solicitado: 5"
        );
        assert!(value["errors"].as_array().unwrap().len() == 1);
    }

    #[test]
    fn test_database_maps_to_internal_title() {
        let err = AppError::database("connection reset");
        assert_eq!(err.title(), "Internal Server Error");
        assert_eq!(err.status_code(), 500);
    }
}
