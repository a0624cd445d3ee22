pub mod app;
pub mod crypto;
pub mod domain;
pub mod error;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::ledger_service::{LedgerService, MintReceipt, MovementRequest, VerificationReport};
pub use domain::ledger::MintRequest;
pub use domain::model::{Category, LedgerAction, Product, ProductStatus, Transaction, UserRole};
pub use domain::summary::{OfflineSummarizer, Summarizer};
pub use domain::verify::VerificationOutcome;
pub use error::{LedgerError, LedgerResult};
pub use infra::config::LedgerConfig;
pub use infra::gemini::GeminiClient;
pub use storage::{LedgerState, RecordStore};
