//! The ledger append rule.
//!
//! A transaction goes to the front of the ledger and the referenced product's `status` and
//! `current_location` are re-derived from it. Appends against unknown or flagged products
//! are refused before anything is written.

use crate::domain::model::{LedgerAction, Transaction, GENESIS_PREVIOUS_HASH};
use crate::error::{LedgerError, LedgerResult};
use crate::storage::LedgerState;
use chrono::{DateTime, Utc};

/// A movement proposed by a supply-chain operator, not yet hashed or timestamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub product_id: String,
    pub action: LedgerAction,
    pub actor: String,
    pub location: String,
}

impl TransactionDraft {
    pub fn new(
        product_id: impl Into<String>,
        action: LedgerAction,
        actor: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            action,
            actor: actor.into(),
            location: location.into(),
        }
    }

    fn validate(&self) -> LedgerResult<()> {
        if self.product_id.trim().is_empty() {
            return Err(LedgerError::EmptyField("product_id"));
        }
        if self.actor.trim().is_empty() {
            return Err(LedgerError::EmptyField("actor"));
        }
        if self.location.trim().is_empty() {
            return Err(LedgerError::EmptyField("location"));
        }
        Ok(())
    }
}

/// Seals `draft` against `state`: `previous_hash` links to the product's latest block.
pub fn seal_draft(
    state: &LedgerState,
    draft: TransactionDraft,
    timestamp: DateTime<Utc>,
) -> LedgerResult<Transaction> {
    draft.validate()?;
    // Ids match exactly, as in verification; a padded id is simply not on the ledger.
    let product_id = draft.product_id.as_str();
    let previous_hash = state
        .latest_transaction(product_id)
        .map(|t| t.hash.clone())
        .unwrap_or_else(|| GENESIS_PREVIOUS_HASH.to_string());

    Ok(Transaction::seal(
        timestamp,
        product_id,
        draft.action,
        draft.actor.trim(),
        draft.location.trim(),
        previous_hash,
    ))
}

/// Records `tx` and re-derives the product it references.
pub fn record_transaction(state: LedgerState, tx: Transaction) -> LedgerResult<LedgerState> {
    let product = state
        .product(&tx.product_id)
        .ok_or_else(|| LedgerError::UnknownProduct(tx.product_id.clone()))?;
    if product.status.is_terminal() {
        return Err(LedgerError::ProductFlagged(tx.product_id.clone()));
    }

    let location = tx.location.clone();
    let status = tx.action.resulting_status();
    let product_id = tx.product_id.clone();

    let mut next = state.with_transaction(tx);
    if let Some(product) = next.product_mut(&product_id) {
        product.current_location = location;
        if let Some(status) = status {
            product.status = status;
        }
    }
    Ok(next)
}
