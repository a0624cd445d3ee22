use crate::crypto::hashing::{hash_transaction_body, to_hex};
use crate::domain::model::ProductStatus;
use crate::error::LedgerError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// `previousHash` of a genesis transaction: there is no predecessor.
pub const GENESIS_PREVIOUS_HASH: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000000";

/// Events that can be recorded against a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerAction {
    Manufactured,
    Shipped,
    ShippedToDistributor,
    #[serde(alias = "RECEIVED_AT_DISTRIBUTOR")]
    ReceivedDistributor,
    QualityCheckPassed,
    RetailStock,
    ReceivedAtRetail,
    Sold,
    Flagged,
}

impl LedgerAction {
    pub const ALL: [LedgerAction; 9] = [
        LedgerAction::Manufactured,
        LedgerAction::Shipped,
        LedgerAction::ShippedToDistributor,
        LedgerAction::ReceivedDistributor,
        LedgerAction::QualityCheckPassed,
        LedgerAction::RetailStock,
        LedgerAction::ReceivedAtRetail,
        LedgerAction::Sold,
        LedgerAction::Flagged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerAction::Manufactured => "MANUFACTURED",
            LedgerAction::Shipped => "SHIPPED",
            LedgerAction::ShippedToDistributor => "SHIPPED_TO_DISTRIBUTOR",
            LedgerAction::ReceivedDistributor => "RECEIVED_DISTRIBUTOR",
            LedgerAction::QualityCheckPassed => "QUALITY_CHECK_PASSED",
            LedgerAction::RetailStock => "RETAIL_STOCK",
            LedgerAction::ReceivedAtRetail => "RECEIVED_AT_RETAIL",
            LedgerAction::Sold => "SOLD",
            LedgerAction::Flagged => "FLAGGED",
        }
    }

    /// Status the product moves to once this action is on the ledger.
    ///
    /// `None` means the action is a checkpoint that leaves the status alone.
    pub fn resulting_status(&self) -> Option<ProductStatus> {
        match self {
            LedgerAction::Manufactured => Some(ProductStatus::Manufactured),
            LedgerAction::Shipped | LedgerAction::ShippedToDistributor => {
                Some(ProductStatus::InTransit)
            }
            LedgerAction::ReceivedDistributor => Some(ProductStatus::AtDistributor),
            LedgerAction::QualityCheckPassed => None,
            LedgerAction::RetailStock | LedgerAction::ReceivedAtRetail => {
                Some(ProductStatus::InRetail)
            }
            LedgerAction::Sold => Some(ProductStatus::Sold),
            LedgerAction::Flagged => Some(ProductStatus::Flagged),
        }
    }
}

impl fmt::Display for LedgerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerAction {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        if normalized == "RECEIVED_AT_DISTRIBUTOR" {
            return Ok(LedgerAction::ReceivedDistributor);
        }
        LedgerAction::ALL
            .into_iter()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| LedgerError::UnknownAction(s.to_string()))
    }
}

/// One block of the simulated ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    pub timestamp: DateTime<Utc>,
    pub product_id: String,
    pub action: LedgerAction,
    pub actor: String,
    pub location: String,
    pub previous_hash: String,
}

impl Transaction {
    /// Builds a transaction and computes its hash over every other field.
    pub fn seal(
        timestamp: DateTime<Utc>,
        product_id: impl Into<String>,
        action: LedgerAction,
        actor: impl Into<String>,
        location: impl Into<String>,
        previous_hash: impl Into<String>,
    ) -> Self {
        let mut tx = Transaction {
            hash: String::new(),
            timestamp,
            product_id: product_id.into(),
            action,
            actor: actor.into(),
            location: location.into(),
            previous_hash: previous_hash.into(),
        };
        tx.hash = tx.expected_hash();
        tx
    }

    /// Recomputes the hash from the current field values.
    pub fn expected_hash(&self) -> String {
        let body = json!({
            "timestamp": self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            "productId": self.product_id,
            "action": self.action.as_str(),
            "actor": self.actor,
            "location": self.location,
            "previousHash": self.previous_hash,
        });
        to_hex(hash_transaction_body(&body))
    }

    pub fn is_genesis(&self) -> bool {
        self.previous_hash == GENESIS_PREVIOUS_HASH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn action_parsing_accepts_form_labels() {
        assert_eq!("shipped".parse::<LedgerAction>(), Ok(LedgerAction::Shipped));
        assert_eq!(
            "Quality Check Passed".parse::<LedgerAction>(),
            Ok(LedgerAction::QualityCheckPassed)
        );
        assert_eq!(
            "received-at-distributor".parse::<LedgerAction>(),
            Ok(LedgerAction::ReceivedDistributor)
        );
        assert!(matches!(
            "TELEPORTED".parse::<LedgerAction>(),
            Err(LedgerError::UnknownAction(_))
        ));
    }

    #[test]
    fn quality_check_keeps_status() {
        assert_eq!(LedgerAction::QualityCheckPassed.resulting_status(), None);
        assert_eq!(
            LedgerAction::RetailStock.resulting_status(),
            Some(ProductStatus::InRetail)
        );
    }

    #[test]
    fn sealed_hash_covers_every_field() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let tx = Transaction::seal(
            at,
            "TC-IN-1",
            LedgerAction::Shipped,
            "Carrier",
            "Delhi",
            GENESIS_PREVIOUS_HASH,
        );
        assert_eq!(tx.hash, tx.expected_hash());

        let mut moved = tx.clone();
        moved.location = "Chennai".to_string();
        assert_ne!(moved.expected_hash(), tx.hash);
    }
}
