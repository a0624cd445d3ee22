pub mod chain;
pub mod verifier;

pub use chain::{check_chain, ChainBreak};
pub use verifier::{assess, Assessment, VerificationOutcome, NOT_FOUND_ANALYSIS};
