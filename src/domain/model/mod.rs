//! Ledger records: products (digital twins), transactions (blocks) and the roles that
//! operate on them.

pub mod demo;
pub mod product;
pub mod role;
pub mod transaction;

pub use demo::{demo_ledger, DEMO_SCAN_IDS};
pub use product::{placeholder_image_url, Category, Product, ProductStatus};
pub use role::UserRole;
pub use transaction::{LedgerAction, Transaction, GENESIS_PREVIOUS_HASH};
