pub mod inventory;

pub use inventory::PostgresInventoryRepository;
