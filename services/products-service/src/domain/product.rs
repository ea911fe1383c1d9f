//! 产品实体与仓储接口

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tienda_errors::AppResult;

/// 产品实体（productos 表）
///
/// 价格用 DECIMAL(10,2) 存储，读写全程保持十进制精度
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub nombre: String,
    pub precio: Decimal,
    pub descripcion: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 创建产品的输入
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub nombre: String,
    pub precio: Decimal,
    pub descripcion: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: NewProduct) -> AppResult<Product>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>>;

    async fn find_all(&self) -> AppResult<Vec<Product>>;
}
