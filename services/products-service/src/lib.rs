//! Products Service - 产品目录微服务
//!
//! REST + JSON:API，负责产品主数据

pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod migrations;
