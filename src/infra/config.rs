//! Centralized configuration (environment variables + defaults).

use anyhow::Context;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MANUFACTURER: &str = "My Factory Ltd";
pub const DEFAULT_ORIGIN_LOCATION: &str = "Factory Warehouse, Mumbai";
pub const DEFAULT_ACTOR: &str = "Logistics Partner";
pub const DEFAULT_SUMMARY_TIMEOUT_MS: u64 = 10_000;

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses `name` if set, otherwise returns `default`. A set-but-invalid value is an error.
fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty_var(name) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{} has an invalid value: {:?}", name, raw)),
        None => Ok(default),
    }
}

/// Address the API server listens on.
pub fn bind_addr() -> String {
    non_empty_var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
}

/// Gemini API key (optional). `API_KEY` is accepted as a fallback name.
pub fn gemini_api_key() -> Option<String> {
    non_empty_var("GEMINI_API_KEY").or_else(|| non_empty_var("API_KEY"))
}

pub fn gemini_model() -> String {
    non_empty_var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
}

/// Overridable so tests and proxies can stand in for the Google endpoint.
pub fn gemini_api_base() -> String {
    non_empty_var("GEMINI_API_BASE")
        .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Knobs for the ledger workflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Manufacturer stamped on minted products and their genesis block.
    pub manufacturer: String,
    /// Where minted products start; also the genesis block's location.
    pub origin_location: String,
    /// Actor recorded when a movement does not name one.
    pub default_actor: String,
    /// Simulated lookup latency applied before each verification.
    pub scan_delay: Duration,
    /// Upper bound on a single summary/insight call.
    pub summary_timeout: Duration,
    /// Start with the demo catalogue instead of an empty ledger.
    pub seed_demo_data: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            manufacturer: DEFAULT_MANUFACTURER.to_string(),
            origin_location: DEFAULT_ORIGIN_LOCATION.to_string(),
            default_actor: DEFAULT_ACTOR.to_string(),
            scan_delay: Duration::ZERO,
            summary_timeout: Duration::from_millis(DEFAULT_SUMMARY_TIMEOUT_MS),
            seed_demo_data: true,
        }
    }
}

impl LedgerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            manufacturer: non_empty_var("MINT_MANUFACTURER").unwrap_or(defaults.manufacturer),
            origin_location: non_empty_var("MINT_ORIGIN_LOCATION")
                .unwrap_or(defaults.origin_location),
            default_actor: non_empty_var("DEFAULT_ACTOR").unwrap_or(defaults.default_actor),
            scan_delay: Duration::from_millis(parse_var("SCAN_DELAY_MS", 0u64)?),
            summary_timeout: Duration::from_millis(
                parse_var("SUMMARY_TIMEOUT_MS", DEFAULT_SUMMARY_TIMEOUT_MS)?.max(1),
            ),
            seed_demo_data: parse_var("SEED_DEMO_DATA", defaults.seed_demo_data)?,
        })
    }
}
