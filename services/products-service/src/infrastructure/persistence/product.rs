//! PostgreSQL 产品 Repository 实现

use async_trait::async_trait;
use sqlx::PgPool;
use tienda_errors::{AppError, AppResult};

use crate::domain::{NewProduct, Product, ProductRepository};

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: NewProduct) -> AppResult<Product> {
        let created = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO productos (nombre, precio, descripcion)
            VALUES ($1, $2, $3)
            RETURNING id, nombre, precio, descripcion, created_at
            "#,
        )
        .bind(&product.nombre)
        .bind(product.precio)
        .bind(&product.descripcion)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create product: {}", e)))?;

        Ok(created)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, nombre, precio, descripcion, created_at FROM productos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find product: {}", e)))?;

        Ok(product)
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, nombre, precio, descripcion, created_at FROM productos ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list products: {}", e)))?;

        Ok(products)
    }
}
