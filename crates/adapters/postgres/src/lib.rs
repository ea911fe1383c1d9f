//! tienda-adapter-postgres - PostgreSQL 适配器
//!
//! 连接池、健康检查与 schema 迁移

pub mod connection;
pub mod migration;

pub use connection::{PostgresConfig, check_connection};
pub use migration::{Migration, MigrationManager, MigrationResult};
