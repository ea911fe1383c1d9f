//! tienda-common - 通用类型和工具库

pub mod jsonapi;
pub mod retry;

pub use retry::*;
