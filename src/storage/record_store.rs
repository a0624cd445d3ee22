//! The session's authoritative product and transaction lists.
//!
//! State is never mutated in place. Every write builds a new `LedgerState` from a copy of the
//! current one and swaps it in under the write lock, so readers holding a snapshot never see
//! a half-applied mint or append.

use crate::domain::model::{Product, Transaction};
use crate::error::{LedgerError, LedgerResult};
use std::sync::Arc;
use tokio::sync::RwLock;

/// An immutable view of the ledger at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerState {
    products: Vec<Product>,
    /// Newest first.
    transactions: Vec<Transaction>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn contains_product(&self, id: &str) -> bool {
        self.product(id).is_some()
    }

    /// All transactions for `product_id`, in store order (newest first).
    pub fn history(&self, product_id: &str) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.product_id == product_id)
            .cloned()
            .collect()
    }

    pub fn latest_transaction(&self, product_id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.product_id == product_id)
    }

    /// Appends a product. Ids are unique across the store.
    pub fn with_product(mut self, product: Product) -> LedgerResult<Self> {
        if self.contains_product(&product.id) {
            return Err(LedgerError::DuplicateProduct(product.id));
        }
        self.products.push(product);
        Ok(self)
    }

    /// Raw insert at the front of the ledger. Product re-derivation is the append rule's job.
    pub(crate) fn with_transaction(mut self, tx: Transaction) -> Self {
        self.transactions.insert(0, tx);
        self
    }

    pub(crate) fn product_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }
}

/// Owns the current `LedgerState` and serializes writers.
#[derive(Debug, Default)]
pub struct RecordStore {
    state: RwLock<Arc<LedgerState>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: LedgerState) -> Self {
        Self {
            state: RwLock::new(Arc::new(state)),
        }
    }

    /// Cheap point-in-time view; does not block later writers.
    pub async fn snapshot(&self) -> Arc<LedgerState> {
        self.state.read().await.clone()
    }

    pub async fn add_product(&self, product: Product) -> LedgerResult<Arc<LedgerState>> {
        let (state, ()) = self
            .commit(|state| Ok((state.with_product(product)?, ())))
            .await?;
        Ok(state)
    }

    /// Applies `update` to a copy of the current state and installs the state it returns,
    /// handing back the new snapshot together with whatever else `update` produced.
    ///
    /// If `update` fails the stored state is left exactly as it was.
    pub async fn commit<T, F>(&self, update: F) -> LedgerResult<(Arc<LedgerState>, T)>
    where
        F: FnOnce(LedgerState) -> LedgerResult<(LedgerState, T)>,
    {
        let mut guard = self.state.write().await;
        let (next, output) = update(LedgerState::clone(&guard))?;
        let next = Arc::new(next);
        *guard = next.clone();
        Ok((next, output))
    }
}
