//! 上游产品目录的只读视图

use async_trait::async_trait;
use rust_decimal::Decimal;
use tienda_errors::AppResult;

/// 远端产品快照
///
/// 只在单次请求期间有效；precio 是购买时刻的权威价格
#[derive(Debug, Clone)]
pub struct RemoteProduct {
    pub id: i32,
    pub nombre: String,
    pub precio: Decimal,
    pub descripcion: Option<String>,
}

/// 产品目录网关
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// 404 为终态 NotFound（不再重试）；其余失败重试耗尽后为 ServiceUnavailable
    async fn fetch(&self, producto_id: i32) -> AppResult<RemoteProduct>;
}
