pub mod inventory;
pub mod product;
pub mod repository;

pub use inventory::{InventoryRecord, PurchaseRecord};
pub use product::{ProductGateway, RemoteProduct};
pub use repository::InventoryRepository;

#[cfg(test)]
pub use product::MockProductGateway;
#[cfg(test)]
pub use repository::MockInventoryRepository;
