//! Injected sources of randomness and time.
//!
//! Production wiring uses the random/system implementations; tests swap in the sequential
//! and fixed ones so ids, hashes and scan captures are reproducible.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

pub const PRODUCT_ID_PREFIX: &str = "TC-IN-";

pub trait IdProvider: Send + Sync {
    /// Proposes an id for a new product. The caller checks it against the store.
    fn product_id(&self) -> String;
}

/// `TC-IN-` followed by 8 uppercase hex digits (32 random bits).
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdProvider;

impl IdProvider for RandomIdProvider {
    fn product_id(&self) -> String {
        let n: u32 = rand::thread_rng().gen();
        format!("{}{:08X}", PRODUCT_ID_PREFIX, n)
    }
}

/// Hands out `<prefix>0001`, `<prefix>0002`, ...
#[derive(Debug)]
pub struct SequentialIdProvider {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdProvider {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdProvider for SequentialIdProvider {
    fn product_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{:04}", self.prefix, n)
    }
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Stands in for the camera: decides which code a capture "read".
pub trait ScanSource: Send + Sync {
    fn capture(&self, candidates: &[&str]) -> Option<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomScanSource;

impl ScanSource for RandomScanSource {
    fn capture(&self, candidates: &[&str]) -> Option<String> {
        candidates
            .choose(&mut rand::thread_rng())
            .map(|id| id.to_string())
    }
}

/// Always reads the same code, whatever is in front of the lens.
#[derive(Debug, Clone)]
pub struct FixedScanSource(pub String);

impl ScanSource for FixedScanSource {
    fn capture(&self, _candidates: &[&str]) -> Option<String> {
        Some(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_have_the_portal_shape() {
        let id = RandomIdProvider.product_id();
        assert!(id.starts_with(PRODUCT_ID_PREFIX));
        let suffix = &id[PRODUCT_ID_PREFIX.len()..];
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIdProvider::new("T-");
        assert_eq!(ids.product_id(), "T-0001");
        assert_eq!(ids.product_id(), "T-0002");
    }

    #[test]
    fn random_capture_picks_a_candidate() {
        let picked = RandomScanSource.capture(&["A", "B"]).unwrap();
        assert!(picked == "A" || picked == "B");
        assert_eq!(RandomScanSource.capture(&[]), None);
    }
}
