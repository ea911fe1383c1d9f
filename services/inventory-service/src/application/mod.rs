pub mod purchases;

pub use purchases::{PurchaseConfirmation, PurchaseService};
