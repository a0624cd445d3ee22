// Resolves a scanned identifier against a ledger snapshot.

use crate::domain::model::{Product, Transaction};
use crate::domain::verify::chain::check_chain;
use crate::storage::LedgerState;
use serde::Serialize;
use utoipa::ToSchema;

pub const NOT_FOUND_ANALYSIS: &str =
    "Product ID not found on the blockchain. This item may be counterfeit.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    Authentic,
    Flagged,
    NotFound,
}

impl VerificationOutcome {
    /// Headline shown to whoever scanned the product.
    pub fn message(&self) -> &'static str {
        match self {
            VerificationOutcome::Authentic => {
                "Authentic product. Its supply chain record is on the ledger."
            }
            VerificationOutcome::Flagged => {
                "This product ID exists but has been flagged as potentially counterfeit or stolen."
            }
            VerificationOutcome::NotFound => "Product ID not found in the ledger.",
        }
    }
}

/// The local, deterministic part of a verification: everything except the AI analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub scanned_id: String,
    pub product: Option<Product>,
    pub history: Vec<Transaction>,
    pub outcome: VerificationOutcome,
    pub chain_intact: bool,
}

impl Assessment {
    pub fn found(&self) -> bool {
        self.product.is_some()
    }

    pub fn verified(&self) -> bool {
        self.outcome == VerificationOutcome::Authentic
    }
}

/// Looks `id` up by exact match and gathers its history in store order.
pub fn assess(state: &LedgerState, id: &str) -> Assessment {
    let Some(product) = state.product(id).cloned() else {
        return Assessment {
            scanned_id: id.to_string(),
            product: None,
            history: Vec::new(),
            outcome: VerificationOutcome::NotFound,
            chain_intact: false,
        };
    };

    let history = state.history(&product.id);
    let chain_intact = match check_chain(&history) {
        Ok(()) => true,
        Err(brk) => {
            tracing::warn!(product_id = %product.id, ?brk, "ledger chain check failed");
            false
        }
    };
    let outcome = if product.is_flagged() {
        VerificationOutcome::Flagged
    } else {
        VerificationOutcome::Authentic
    };

    Assessment {
        scanned_id: id.to_string(),
        product: Some(product),
        history,
        outcome,
        chain_intact,
    }
}
