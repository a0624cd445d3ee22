// Checks that a product's blocks hash correctly and link back to genesis.

use crate::domain::model::{Transaction, GENESIS_PREVIOUS_HASH};

/// Where a product's chain first breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainBreak {
    /// The stored hash does not match the block's contents.
    HashMismatch { hash: String },
    /// The block does not point at the block recorded before it.
    BrokenLink { hash: String, expected_previous: String },
}

/// Walks `history` (newest first, as stored) from its oldest block forward.
///
/// An empty history is trivially intact.
pub fn check_chain(history: &[Transaction]) -> Result<(), ChainBreak> {
    let mut expected_previous: &str = GENESIS_PREVIOUS_HASH;
    for tx in history.iter().rev() {
        if tx.previous_hash != expected_previous {
            return Err(ChainBreak::BrokenLink {
                hash: tx.hash.clone(),
                expected_previous: expected_previous.to_string(),
            });
        }
        if tx.hash != tx.expected_hash() {
            return Err(ChainBreak::HashMismatch {
                hash: tx.hash.clone(),
            });
        }
        expected_previous = tx.hash.as_str();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::demo_ledger;

    #[test]
    fn seeded_chain_is_intact() {
        let state = demo_ledger().unwrap();
        assert_eq!(check_chain(&state.history("TC-IN-7829")), Ok(()));
        assert_eq!(check_chain(&[]), Ok(()));
    }

    #[test]
    fn tampered_contents_are_detected() {
        let state = demo_ledger().unwrap();
        let mut history = state.history("TC-IN-7829");
        history[1].location = "Somewhere Else".to_string();
        assert!(matches!(
            check_chain(&history),
            Err(ChainBreak::HashMismatch { .. })
        ));
    }

    #[test]
    fn missing_block_breaks_the_link() {
        let state = demo_ledger().unwrap();
        let mut history = state.history("TC-IN-7829");
        history.remove(1);
        assert!(matches!(
            check_chain(&history),
            Err(ChainBreak::BrokenLink { .. })
        ));
    }
}
