//! The natural-language summary collaborator.
//!
//! Summaries are cosmetic. A failure or timeout here must never change what a verification
//! reports, so callers go through the `*_or_fallback` wrappers, which always yield text.

use crate::domain::model::{Product, Transaction};
use async_trait::async_trait;
use std::time::Duration;

pub mod prompt;

pub use prompt::{analysis_prompt, MARKET_INSIGHT_PROMPT};

pub const ANALYSIS_UNAVAILABLE: &str =
    "Verification successful. Blockchain record is intact, but AI analysis is currently unavailable.";
pub const ANALYSIS_EMPTY: &str = "Verification complete. Product chain verified.";
pub const INSIGHT_FALLBACK: &str = "Blockchain transparency builds consumer trust.";

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Consumer-facing summary of a product and its history (newest first).
    async fn summarize(&self, product: &Product, history: &[Transaction]) -> anyhow::Result<String>;

    /// One-sentence dashboard insight.
    async fn market_insight(&self) -> anyhow::Result<String>;
}

/// Used when no text-generation backend is configured. Every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineSummarizer;

#[async_trait]
impl Summarizer for OfflineSummarizer {
    async fn summarize(&self, _product: &Product, _history: &[Transaction]) -> anyhow::Result<String> {
        anyhow::bail!("no text-generation backend configured")
    }

    async fn market_insight(&self) -> anyhow::Result<String> {
        anyhow::bail!("no text-generation backend configured")
    }
}

pub async fn summarize_or_fallback(
    summarizer: &dyn Summarizer,
    product: &Product,
    history: &[Transaction],
    timeout: Duration,
) -> String {
    match tokio::time::timeout(timeout, summarizer.summarize(product, history)).await {
        Ok(Ok(text)) if text.trim().is_empty() => ANALYSIS_EMPTY.to_string(),
        Ok(Ok(text)) => text.trim().to_string(),
        Ok(Err(e)) => {
            tracing::warn!(product_id = %product.id, error = %e, "product analysis failed");
            ANALYSIS_UNAVAILABLE.to_string()
        }
        Err(_) => {
            tracing::warn!(product_id = %product.id, ?timeout, "product analysis timed out");
            ANALYSIS_UNAVAILABLE.to_string()
        }
    }
}

pub async fn market_insight_or_fallback(summarizer: &dyn Summarizer, timeout: Duration) -> String {
    match tokio::time::timeout(timeout, summarizer.market_insight()).await {
        Ok(Ok(text)) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(Ok(_)) => INSIGHT_FALLBACK.to_string(),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "market insight failed");
            INSIGHT_FALLBACK.to_string()
        }
        Err(_) => {
            tracing::warn!(?timeout, "market insight timed out");
            INSIGHT_FALLBACK.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::demo_ledger;

    struct Slow;

    #[async_trait]
    impl Summarizer for Slow {
        async fn summarize(&self, _: &Product, _: &[Transaction]) -> anyhow::Result<String> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".to_string())
        }

        async fn market_insight(&self) -> anyhow::Result<String> {
            Ok("   ".to_string())
        }
    }

    #[tokio::test]
    async fn offline_backend_degrades_to_fallbacks() {
        let state = demo_ledger().unwrap();
        let product = state.product("TC-IN-7829").unwrap();
        let text = summarize_or_fallback(&OfflineSummarizer, product, &[], Duration::from_secs(1)).await;
        assert_eq!(text, ANALYSIS_UNAVAILABLE);
        assert_eq!(
            market_insight_or_fallback(&OfflineSummarizer, Duration::from_secs(1)).await,
            INSIGHT_FALLBACK
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_backend_times_out() {
        let state = demo_ledger().unwrap();
        let product = state.product("TC-IN-7829").unwrap();
        let text = summarize_or_fallback(&Slow, product, &[], Duration::from_millis(50)).await;
        assert_eq!(text, ANALYSIS_UNAVAILABLE);
        assert_eq!(
            market_insight_or_fallback(&Slow, Duration::from_millis(50)).await,
            INSIGHT_FALLBACK
        );
    }
}
