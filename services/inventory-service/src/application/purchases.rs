//! 购买工作流
//!
//! 步骤固定有序：解析产品 → 预检查库存 → 行锁扣减 → 写入历史 → 组装结果。
//! 历史记录只在扣减成功之后写入。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tienda_errors::{AppError, AppResult};
use tracing::{error, info};

use crate::domain::{InventoryRepository, ProductGateway};

#[derive(Clone)]
pub struct PurchaseService {
    products: Arc<dyn ProductGateway>,
    inventory: Arc<dyn InventoryRepository>,
}

/// 一次购买的结果
#[derive(Debug, Clone)]
pub struct PurchaseConfirmation {
    pub id: i32,
    pub producto_id: i32,
    pub producto_nombre: String,
    pub cantidad: i32,
    pub precio_unitario: Decimal,
    pub total: Decimal,
    pub inventario_restante: i32,
    pub fecha: DateTime<Utc>,
}

impl PurchaseService {
    pub fn new(products: Arc<dyn ProductGateway>, inventory: Arc<dyn InventoryRepository>) -> Self {
        Self {
            products,
            inventory,
        }
    }

    /// 处理一次已通过请求校验的购买
    ///
    /// 预检查只是快速失败；步骤 4 的行锁扣减才是防超卖的权威判定，
    /// 预检查与扣减之间输掉竞争时以扣减返回的错误为准。
    pub async fn execute(&self, producto_id: i32, cantidad: i32) -> AppResult<PurchaseConfirmation> {
        let product = self.products.fetch(producto_id).await?;

        let inventory = self
            .inventory
            .find_by_product_id(producto_id)
            .await?
            .ok_or_else(|| AppError::not_found("Inventario no encontrado para este producto"))?;

        if inventory.cantidad < cantidad {
            return Err(AppError::conflict(format!(
                "Inventario insuficiente. Disponible: {}, Solicitado: {}",
                inventory.cantidad, cantidad
            )));
        }

        let updated = self.inventory.decrement_stock(producto_id, cantidad).await?;

        // 扣减与历史写入不在同一事务中；这里失败会留下已扣减但无历史的缺口
        let record = self
            .inventory
            .create_purchase_record(producto_id, cantidad, product.precio)
            .await
            .map_err(|e| {
                error!(
                    producto_id,
                    cantidad,
                    error = %e,
                    "Stock decremented but purchase history write failed"
                );
                e
            })?;

        info!(
            producto_id,
            cantidad,
            total = %record.total,
            "Purchase completed"
        );

        Ok(PurchaseConfirmation {
            id: record.id,
            producto_id,
            producto_nombre: product.nombre,
            cantidad,
            precio_unitario: record.precio_unitario,
            total: record.total,
            inventario_restante: updated.cantidad,
            fecha: record.created_at,
        })
    }
}
