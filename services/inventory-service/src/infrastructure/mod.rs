pub mod persistence;
pub mod products_client;
