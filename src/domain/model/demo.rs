//! Demo catalogue the portal starts with.
//!
//! The paracetamol journey is replayed through the append rule rather than written as
//! literal blocks, so its hashes chain exactly like anything recorded at runtime.

use super::{Category, LedgerAction, Product, ProductStatus};
use crate::domain::ledger::{record_transaction, seal_draft, TransactionDraft};
use crate::error::LedgerResult;
use crate::storage::LedgerState;
use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Codes the simulated camera can "read".
pub const DEMO_SCAN_IDS: [&str; 3] = ["TC-IN-7829", "TC-IN-9921", "TC-IN-FAKE"];

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn demo_products() -> Vec<Product> {
    vec![
        Product {
            id: "TC-IN-7829".to_string(),
            name: "LifeGuard Paracetamol 500mg".to_string(),
            category: Category::Pharmaceuticals,
            description: "Standard antipyretic and analgesic.".to_string(),
            manufacturer: "MediSafe India Ltd, Mumbai".to_string(),
            manufacture_date: date(2023, 10, 15),
            expiry_date: date(2025, 10, 15),
            batch_number: "B-2023-X99".to_string(),
            image_url: "https://picsum.photos/200/200?random=1".to_string(),
            status: ProductStatus::Manufactured,
            current_location: "Mumbai, MH".to_string(),
        },
        Product {
            id: "TC-IN-9921".to_string(),
            name: "Royal Silk Saree - Kanchipuram".to_string(),
            category: Category::Luxury,
            description: "Authentic handwoven silk saree with gold zari.".to_string(),
            manufacturer: "SilkWeavers Co-op, Tamil Nadu".to_string(),
            manufacture_date: date(2024, 1, 10),
            expiry_date: None,
            batch_number: "S-KANCHI-005".to_string(),
            image_url: "https://picsum.photos/200/200?random=2".to_string(),
            status: ProductStatus::Sold,
            current_location: "Consumer Address, Delhi".to_string(),
        },
        Product {
            id: "TC-IN-FAKE".to_string(),
            name: "Suspected Fake Watch".to_string(),
            category: Category::Luxury,
            description: "Counterfeit imitation of a luxury brand.".to_string(),
            manufacturer: "Unknown Source".to_string(),
            manufacture_date: None,
            expiry_date: None,
            batch_number: "INVALID".to_string(),
            image_url: "https://picsum.photos/200/200?random=3".to_string(),
            status: ProductStatus::Flagged,
            current_location: "Confiscated".to_string(),
        },
    ]
}

// (timestamp, action, actor, location), oldest first
const PARACETAMOL_JOURNEY: [(&str, LedgerAction, &str, &str); 3] = [
    ("2023-10-15 09:00", LedgerAction::Manufactured, "MediSafe India Ltd", "Mumbai, MH"),
    ("2023-10-20 14:30", LedgerAction::ShippedToDistributor, "FastLogistics Inc", "Pune, MH"),
    ("2023-10-25 10:15", LedgerAction::ReceivedAtRetail, "Apollo Pharmacy", "Bangalore, KA"),
];

/// The seeded ledger: three products, one with a full three-block journey.
pub fn demo_ledger() -> LedgerResult<LedgerState> {
    let mut state = LedgerState::new();
    for product in demo_products() {
        state = state.with_product(product)?;
    }

    for (when, action, actor, location) in PARACETAMOL_JOURNEY {
        let timestamp = NaiveDateTime::parse_from_str(when, "%Y-%m-%d %H:%M")
            .map(|naive| Utc.from_utc_datetime(&naive))
            .unwrap_or_default();
        let draft = TransactionDraft::new("TC-IN-7829", action, actor, location);
        let tx = seal_draft(&state, draft, timestamp)?;
        state = record_transaction(state, tx)?;
    }

    Ok(state)
}
