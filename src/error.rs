//! Domain errors raised by the ledger workflows.
//!
//! Infrastructure code (Gemini client, binaries) stays on `anyhow`; everything that a caller
//! of the ledger may want to branch on is a `LedgerError`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("product '{0}' already exists on the ledger")]
    DuplicateProduct(String),

    #[error("product '{0}' is not on the ledger")]
    UnknownProduct(String),

    #[error("product '{0}' is flagged as suspected fake; no further transactions are accepted")]
    ProductFlagged(String),

    #[error("unknown ledger action '{0}'")]
    UnknownAction(String),

    #[error("unknown product category '{0}'")]
    UnknownCategory(String),

    #[error("unknown user role '{0}'")]
    UnknownRole(String),

    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("could not allocate a unique product id after {0} attempts")]
    IdExhausted(u32),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
