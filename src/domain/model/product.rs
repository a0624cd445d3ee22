use crate::error::LedgerError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Product categories accepted by the mint workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Pharmaceuticals,
    Luxury,
    #[serde(rename = "FMCG")]
    Fmcg,
    Electronics,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Pharmaceuticals,
        Category::Luxury,
        Category::Fmcg,
        Category::Electronics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pharmaceuticals => "Pharmaceuticals",
            Category::Luxury => "Luxury",
            Category::Fmcg => "FMCG",
            Category::Electronics => "Electronics",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LedgerError::UnknownCategory(s.to_string()))
    }
}

/// Lifecycle status of a product. Derived from the latest ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ProductStatus {
    Manufactured,
    #[serde(rename = "In Transit")]
    InTransit,
    #[serde(rename = "At Distributor")]
    AtDistributor,
    #[serde(rename = "In Retail")]
    InRetail,
    Sold,
    #[serde(rename = "Flagged (Suspected Fake)")]
    Flagged,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Manufactured => "Manufactured",
            ProductStatus::InTransit => "In Transit",
            ProductStatus::AtDistributor => "At Distributor",
            ProductStatus::InRetail => "In Retail",
            ProductStatus::Sold => "Sold",
            ProductStatus::Flagged => "Flagged (Suspected Fake)",
        }
    }

    /// Flagged is terminal: the ledger refuses further movements for the product.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProductStatus::Flagged)
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The digital twin of a physical item.
///
/// `status` and `current_location` are owned by the append rule; nothing else writes them
/// once the product is on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub manufacturer: String,
    /// `None` when the origin is unknown (confiscated goods, for example).
    pub manufacture_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub batch_number: String,
    pub image_url: String,
    pub status: ProductStatus,
    pub current_location: String,
}

impl Product {
    pub fn is_flagged(&self) -> bool {
        self.status == ProductStatus::Flagged
    }
}

/// Placeholder image for products that have no photo of their own.
pub fn placeholder_image_url(seed: &str) -> String {
    format!("https://picsum.photos/200/200?random={}", seed)
}
