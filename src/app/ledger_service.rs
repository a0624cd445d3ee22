//! The Ledger Service.
//!
//! Owns the record store and the injected providers, and runs the portal's workflows:
//! 1.  Minting a product together with its genesis block.
//! 2.  Recording supply-chain movements through the append rule.
//! 3.  Verifying a scanned or typed product id, including the AI summary.
//!
//! Writes hold the store's write lock only while the new state is built. Verification reads
//! a snapshot and talks to the summary backend without holding any lock, so concurrent
//! verifications are independent and may finish in any order.

use crate::domain::ledger::{self, MintOrigin, MintRequest, TransactionDraft};
use crate::domain::model::{demo_ledger, LedgerAction, Product, Transaction, DEMO_SCAN_IDS};
use crate::domain::providers::{
    Clock, IdProvider, RandomIdProvider, RandomScanSource, ScanSource, SystemClock,
};
use crate::domain::summary::{market_insight_or_fallback, summarize_or_fallback, Summarizer};
use crate::domain::verify::{assess, VerificationOutcome, NOT_FOUND_ANALYSIS};
use crate::error::LedgerResult;
use crate::infra::config::LedgerConfig;
use crate::storage::{LedgerState, RecordStore};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// What a verification tells the person holding the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub scanned_id: String,
    pub found: bool,
    pub verified: bool,
    pub outcome: VerificationOutcome,
    pub message: String,
    pub product: Option<Product>,
    /// Newest first.
    pub history: Vec<Transaction>,
    pub chain_intact: bool,
    pub analysis: String,
}

/// A freshly minted product and its genesis block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MintReceipt {
    pub product: Product,
    pub genesis: Transaction,
}

/// A supply-chain movement as submitted by an operator. `actor` falls back to the
/// configured default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementRequest {
    pub product_id: String,
    pub action: LedgerAction,
    pub location: String,
    pub actor: Option<String>,
}

impl MovementRequest {
    pub fn new(product_id: impl Into<String>, action: LedgerAction, location: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            action,
            location: location.into(),
            actor: None,
        }
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }
}

pub struct LedgerService {
    store: Arc<RecordStore>,
    summarizer: Arc<dyn Summarizer>,
    ids: Arc<dyn IdProvider>,
    clock: Arc<dyn Clock>,
    scanner: Arc<dyn ScanSource>,
    config: LedgerConfig,
}

impl LedgerService {
    /// Creates the service with random ids, the system clock and a random scan source.
    /// Seeds the demo catalogue when `config.seed_demo_data` is set.
    pub fn new(config: LedgerConfig, summarizer: Arc<dyn Summarizer>) -> LedgerResult<Self> {
        let state = if config.seed_demo_data {
            demo_ledger()?
        } else {
            LedgerState::new()
        };
        tracing::info!(
            products = state.products().len(),
            transactions = state.transactions().len(),
            "ledger initialized"
        );

        Ok(Self {
            store: Arc::new(RecordStore::from_state(state)),
            summarizer,
            ids: Arc::new(RandomIdProvider),
            clock: Arc::new(SystemClock),
            scanner: Arc::new(RandomScanSource),
            config,
        })
    }

    pub fn with_id_provider(mut self, ids: Arc<dyn IdProvider>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_scan_source(mut self, scanner: Arc<dyn ScanSource>) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    pub async fn products(&self) -> Vec<Product> {
        self.store.snapshot().await.products().to_vec()
    }

    pub async fn product(&self, id: &str) -> Option<Product> {
        self.store.snapshot().await.product(id).cloned()
    }

    /// The whole ledger, newest first.
    pub async fn transactions(&self) -> Vec<Transaction> {
        self.store.snapshot().await.transactions().to_vec()
    }

    /// Mints a product and its genesis block in a single store commit.
    pub async fn mint(&self, request: MintRequest) -> LedgerResult<MintReceipt> {
        let now = self.clock.now();
        let ids = self.ids.clone();
        let origin = MintOrigin {
            manufacturer: &self.config.manufacturer,
            location: &self.config.origin_location,
        };

        let (_, receipt) = self
            .store
            .commit(|state| {
                let (next, product, genesis) =
                    ledger::mint(state, &request, ids.as_ref(), origin, now)?;
                Ok((next, MintReceipt { product, genesis }))
            })
            .await?;

        tracing::info!(
            product_id = %receipt.product.id,
            batch = %receipt.product.batch_number,
            hash = %receipt.genesis.hash,
            "minted product"
        );
        Ok(receipt)
    }

    /// Seals a movement against the current state and records it.
    pub async fn record_movement(&self, request: MovementRequest) -> LedgerResult<Transaction> {
        let now = self.clock.now();
        let actor = request
            .actor
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| self.config.default_actor.clone());
        let draft = TransactionDraft::new(request.product_id, request.action, actor, request.location);

        let (_, tx) = self
            .store
            .commit(|state| {
                let tx = ledger::seal_draft(&state, draft, now)?;
                let next = ledger::record_transaction(state, tx.clone())?;
                Ok((next, tx))
            })
            .await?;

        tracing::info!(
            product_id = %tx.product_id,
            action = %tx.action,
            location = %tx.location,
            hash = %tx.hash,
            "recorded transaction"
        );
        Ok(tx)
    }

    /// Verifies `id` against the ledger. Never fails: unknown ids and summary outages are
    /// reported inside the result.
    pub async fn verify(&self, id: &str) -> VerificationReport {
        if !self.config.scan_delay.is_zero() {
            tokio::time::sleep(self.config.scan_delay).await;
        }

        let snapshot = self.store.snapshot().await;
        let assessment = assess(&snapshot, id);
        drop(snapshot);

        let analysis = match &assessment.product {
            Some(product) => {
                summarize_or_fallback(
                    self.summarizer.as_ref(),
                    product,
                    &assessment.history,
                    self.config.summary_timeout,
                )
                .await
            }
            None => NOT_FOUND_ANALYSIS.to_string(),
        };

        tracing::info!(
            scanned_id = %assessment.scanned_id,
            outcome = ?assessment.outcome,
            blocks = assessment.history.len(),
            chain_intact = assessment.chain_intact,
            "verification complete"
        );

        VerificationReport {
            found: assessment.found(),
            verified: assessment.verified(),
            message: assessment.outcome.message().to_string(),
            scanned_id: assessment.scanned_id,
            outcome: assessment.outcome,
            product: assessment.product,
            history: assessment.history,
            chain_intact: assessment.chain_intact,
            analysis,
        }
    }

    /// Camera simulation: the scan source picks one of the demo codes, which is then verified.
    pub async fn capture_and_verify(&self) -> VerificationReport {
        let scanned = self.scanner.capture(&DEMO_SCAN_IDS).unwrap_or_default();
        tracing::debug!(scanned_id = %scanned, "simulated capture");
        self.verify(&scanned).await
    }

    pub async fn market_insight(&self) -> String {
        market_insight_or_fallback(self.summarizer.as_ref(), self.config.summary_timeout).await
    }
}
