//! 库存与购买历史实体

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// 库存记录（inventario 表）
///
/// 每个产品唯一一行；cantidad 永不为负
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InventoryRecord {
    pub producto_id: i32,
    pub cantidad: i32,
    pub updated_at: DateTime<Utc>,
}

/// 购买历史记录（historial_compras 表）
///
/// 仅追加、创建后不可变；total 在写入时计算一次，之后不再重算
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PurchaseRecord {
    pub id: i32,
    pub producto_id: i32,
    pub cantidad: i32,
    pub precio_unitario: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}
