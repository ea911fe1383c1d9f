//! Inventory Service - 库存与购买微服务
//!
//! 核心路径：跨服务产品查询 → 行锁条件扣减 → 购买历史追加

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod migrations;
