//! inventario / historial_compras schema 引导

use tienda_adapter_postgres::Migration;

pub fn migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "create_inventario",
            r#"
            CREATE TABLE IF NOT EXISTS inventario (
                id SERIAL PRIMARY KEY,
                producto_id INTEGER NOT NULL UNIQUE,
                cantidad INTEGER NOT NULL DEFAULT 0,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        ),
        Migration::new(
            2,
            "create_historial_compras",
            r#"
            CREATE TABLE IF NOT EXISTS historial_compras (
                id SERIAL PRIMARY KEY,
                producto_id INTEGER NOT NULL,
                cantidad INTEGER NOT NULL,
                precio_unitario DECIMAL(10, 2),
                total DECIMAL(10, 2),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        ),
        Migration::new(
            3,
            "index_historial_compras_producto",
            r#"
            CREATE INDEX IF NOT EXISTS idx_historial_compras_producto
                ON historial_compras (producto_id, created_at DESC)
            "#,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_are_unique() {
        let migrations = migrations();
        let mut versions: Vec<i64> = migrations.iter().map(|m| m.version).collect();
        versions.sort_unstable();
        versions.dedup();
        assert_eq!(versions.len(), migrations.len());
    }
}
