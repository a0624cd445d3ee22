pub mod ledger;
pub mod model;
pub mod providers;
pub mod summary;
pub mod verify;
