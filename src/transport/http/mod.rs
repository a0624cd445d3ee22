pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod health;
    pub mod insights;
    pub mod ledger;
    pub mod products;
    pub mod verify;
}

pub use router::{create_router, ApiDoc};
pub use types::{AppState, ROLE_HEADER};
