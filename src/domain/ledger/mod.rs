pub mod append;
pub mod mint;

pub use append::{record_transaction, seal_draft, TransactionDraft};
pub use mint::{mint, MintOrigin, MintRequest, MAX_ID_ATTEMPTS};
