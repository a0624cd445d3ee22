//! Minting: a new digital twin plus its genesis block, committed as one unit.

use crate::domain::ledger::append::record_transaction;
use crate::domain::model::{
    placeholder_image_url, Category, LedgerAction, Product, ProductStatus, Transaction,
    GENESIS_PREVIOUS_HASH,
};
use crate::domain::providers::IdProvider;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::LedgerState;
use chrono::{DateTime, NaiveDate, Utc};

/// How many ids the provider may propose before minting gives up.
pub const MAX_ID_ATTEMPTS: u32 = 8;

pub const DEFAULT_DESCRIPTION: &str = "New product created";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    pub name: String,
    pub category: Category,
    pub batch_number: String,
    pub description: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

impl MintRequest {
    pub fn new(name: impl Into<String>, category: Category, batch_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category,
            batch_number: batch_number.into(),
            description: None,
            expiry_date: None,
        }
    }

    fn validate(&self) -> LedgerResult<()> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::EmptyField("name"));
        }
        if self.batch_number.trim().is_empty() {
            return Err(LedgerError::EmptyField("batch_number"));
        }
        Ok(())
    }
}

/// Who mints and where new products start their journey.
#[derive(Debug, Clone, Copy)]
pub struct MintOrigin<'a> {
    pub manufacturer: &'a str,
    pub location: &'a str,
}

/// Allocates an id that is not yet on the ledger.
fn allocate_id(state: &LedgerState, ids: &dyn IdProvider) -> LedgerResult<String> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = ids.product_id();
        if !state.contains_product(&candidate) {
            return Ok(candidate);
        }
        tracing::debug!(id = %candidate, "product id collision, drawing another");
    }
    Err(LedgerError::IdExhausted(MAX_ID_ATTEMPTS))
}

/// Builds the product and genesis transaction and applies both to `state`.
///
/// Either both land in the returned state or an error is returned and `state` is dropped
/// unchanged from the caller's point of view.
pub fn mint(
    state: LedgerState,
    request: &MintRequest,
    ids: &dyn IdProvider,
    origin: MintOrigin<'_>,
    now: DateTime<Utc>,
) -> LedgerResult<(LedgerState, Product, Transaction)> {
    request.validate()?;
    let id = allocate_id(&state, ids)?;

    let product = Product {
        id: id.clone(),
        name: request.name.trim().to_string(),
        category: request.category,
        description: request
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string(),
        manufacturer: origin.manufacturer.to_string(),
        manufacture_date: Some(now.date_naive()),
        expiry_date: request.expiry_date,
        batch_number: request.batch_number.trim().to_string(),
        image_url: placeholder_image_url(&id),
        status: ProductStatus::Manufactured,
        current_location: origin.location.to_string(),
    };

    let genesis = Transaction::seal(
        now,
        id,
        LedgerAction::Manufactured,
        origin.manufacturer,
        origin.location,
        GENESIS_PREVIOUS_HASH,
    );

    let state = state.with_product(product)?;
    let state = record_transaction(state, genesis.clone())?;
    let product = state
        .product(&genesis.product_id)
        .cloned()
        .ok_or_else(|| LedgerError::UnknownProduct(genesis.product_id.clone()))?;
    Ok((state, product, genesis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::providers::SequentialIdProvider;
    use chrono::TimeZone;

    const ORIGIN: MintOrigin<'static> = MintOrigin {
        manufacturer: "My Factory Ltd",
        location: "Factory Warehouse, Mumbai",
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 2, 8, 30, 0).unwrap()
    }

    #[test]
    fn mint_creates_product_and_genesis() {
        let ids = SequentialIdProvider::new("TC-IN-");
        let req = MintRequest::new("Test Drug", Category::Pharmaceuticals, "B-1");
        let (state, product, genesis) = mint(LedgerState::new(), &req, &ids, ORIGIN, now()).unwrap();

        assert_eq!(product.id, "TC-IN-0001");
        assert_eq!(product.status, ProductStatus::Manufactured);
        assert_eq!(product.current_location, ORIGIN.location);
        assert_eq!(product.manufacture_date, NaiveDate::from_ymd_opt(2024, 6, 2));
        assert_eq!(genesis.previous_hash, GENESIS_PREVIOUS_HASH);
        assert_eq!(genesis.action, LedgerAction::Manufactured);
        assert_eq!(state.history(&product.id), vec![genesis]);
    }

    #[test]
    fn colliding_ids_are_redrawn() {
        let ids = SequentialIdProvider::new("TC-IN-");
        let req = MintRequest::new("A", Category::Luxury, "B-1");
        let (state, first, _) = mint(LedgerState::new(), &req, &ids, ORIGIN, now()).unwrap();

        // Restart the sequence so the first proposal collides.
        let replay = SequentialIdProvider::new("TC-IN-");
        let (_, second, _) = mint(state, &req, &replay, ORIGIN, now()).unwrap();
        assert_eq!(first.id, "TC-IN-0001");
        assert_eq!(second.id, "TC-IN-0002");
    }

    struct Stuck;
    impl IdProvider for Stuck {
        fn product_id(&self) -> String {
            "TC-IN-0001".to_string()
        }
    }

    #[test]
    fn exhausted_id_space_is_an_error() {
        let req = MintRequest::new("A", Category::Luxury, "B-1");
        let (state, _, _) = mint(LedgerState::new(), &req, &Stuck, ORIGIN, now()).unwrap();
        assert_eq!(
            mint(state, &req, &Stuck, ORIGIN, now()).unwrap_err(),
            LedgerError::IdExhausted(MAX_ID_ATTEMPTS)
        );
    }

    #[test]
    fn required_fields_are_checked() {
        let ids = SequentialIdProvider::new("TC-IN-");
        let req = MintRequest::new("Drug", Category::Pharmaceuticals, " ");
        assert_eq!(
            mint(LedgerState::new(), &req, &ids, ORIGIN, now()).unwrap_err(),
            LedgerError::EmptyField("batch_number")
        );
    }
}
