//! 库存台账接口

use async_trait::async_trait;
use rust_decimal::Decimal;
use tienda_errors::AppResult;

use super::{InventoryRecord, PurchaseRecord};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// 无锁读取，仅供展示；购买正确性不依赖它
    async fn find_by_product_id(&self, producto_id: i32) -> AppResult<Option<InventoryRecord>>;

    /// 插入或整体替换数量；幂等
    async fn upsert(&self, producto_id: i32, cantidad: i32) -> AppResult<InventoryRecord>;

    /// 行锁事务内的条件扣减
    ///
    /// 行不存在 → NotFound；库存不足 → Conflict；任一失败整体回滚
    async fn decrement_stock(&self, producto_id: i32, cantidad: i32) -> AppResult<InventoryRecord>;

    /// 计算 total 并追加购买历史
    async fn create_purchase_record(
        &self,
        producto_id: i32,
        cantidad: i32,
        precio_unitario: Decimal,
    ) -> AppResult<PurchaseRecord>;

    /// 按创建时间倒序；无记录时返回空列表
    async fn purchase_history(&self, producto_id: i32) -> AppResult<Vec<PurchaseRecord>>;
}
