//! PostgreSQL 库存台账实现

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tienda_errors::{AppError, AppResult};

use crate::domain::{InventoryRecord, InventoryRepository, PurchaseRecord};

pub struct PostgresInventoryRepository {
    pool: PgPool,
}

impl PostgresInventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryRepository for PostgresInventoryRepository {
    async fn find_by_product_id(&self, producto_id: i32) -> AppResult<Option<InventoryRecord>> {
        let record = sqlx::query_as::<_, InventoryRecord>(
            "SELECT producto_id, cantidad, updated_at FROM inventario WHERE producto_id = $1",
        )
        .bind(producto_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to read inventory: {}", e)))?;

        Ok(record)
    }

    async fn upsert(&self, producto_id: i32, cantidad: i32) -> AppResult<InventoryRecord> {
        let record = sqlx::query_as::<_, InventoryRecord>(
            r#"
            INSERT INTO inventario (producto_id, cantidad, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (producto_id)
            DO UPDATE SET cantidad = EXCLUDED.cantidad, updated_at = NOW()
            RETURNING producto_id, cantidad, updated_at
            "#,
        )
        .bind(producto_id)
        .bind(cantidad)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert inventory: {}", e)))?;

        Ok(record)
    }

    async fn decrement_stock(&self, producto_id: i32, cantidad: i32) -> AppResult<InventoryRecord> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        // 行锁持续到事务结束，串行化同一产品的并发扣减
        let current: Option<(i32,)> =
            sqlx::query_as("SELECT cantidad FROM inventario WHERE producto_id = $1 FOR UPDATE")
                .bind(producto_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to lock inventory row: {}", e)))?;

        // 提前 return 会 drop 未提交的事务，sqlx 随之回滚
        let Some((available,)) = current else {
            return Err(AppError::not_found(
                "Inventario no encontrado para este producto",
            ));
        };

        if available < cantidad {
            return Err(AppError::conflict(format!(
                "Inventario insuficiente. Disponible: {}, Solicitado: {}",
                available, cantidad
            )));
        }

        let updated = sqlx::query_as::<_, InventoryRecord>(
            r#"
            UPDATE inventario
            SET cantidad = cantidad - $1, updated_at = NOW()
            WHERE producto_id = $2
            RETURNING producto_id, cantidad, updated_at
            "#,
        )
        .bind(cantidad)
        .bind(producto_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to decrement inventory: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit decrement: {}", e)))?;

        Ok(updated)
    }

    async fn create_purchase_record(
        &self,
        producto_id: i32,
        cantidad: i32,
        precio_unitario: Decimal,
    ) -> AppResult<PurchaseRecord> {
        let total = precio_unitario * Decimal::from(cantidad);

        let record = sqlx::query_as::<_, PurchaseRecord>(
            r#"
            INSERT INTO historial_compras (producto_id, cantidad, precio_unitario, total)
            VALUES ($1, $2, $3, $4)
            RETURNING id, producto_id, cantidad, precio_unitario, total, created_at
            "#,
        )
        .bind(producto_id)
        .bind(cantidad)
        .bind(precio_unitario)
        .bind(total)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record purchase: {}", e)))?;

        Ok(record)
    }

    async fn purchase_history(&self, producto_id: i32) -> AppResult<Vec<PurchaseRecord>> {
        let records = sqlx::query_as::<_, PurchaseRecord>(
            r#"
            SELECT id, producto_id, cantidad, precio_unitario, total, created_at
            FROM historial_compras
            WHERE producto_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(producto_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load purchase history: {}", e)))?;

        Ok(records)
    }
}
