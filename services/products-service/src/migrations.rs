//! productos schema 引导

use tienda_adapter_postgres::Migration;

pub fn migrations() -> Vec<Migration> {
    vec![Migration::new(
        1,
        "create_productos",
        r#"
        CREATE TABLE IF NOT EXISTS productos (
            id SERIAL PRIMARY KEY,
            nombre VARCHAR(255) NOT NULL,
            precio DECIMAL(10, 2) NOT NULL,
            descripcion TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_are_unique_and_ordered() {
        let migrations = migrations();
        let mut versions: Vec<i64> = migrations.iter().map(|m| m.version).collect();
        versions.dedup();
        assert_eq!(versions.len(), migrations.len());
    }
}
