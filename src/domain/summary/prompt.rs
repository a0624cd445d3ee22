use crate::domain::model::{Product, Transaction};
use std::fmt::Write;

pub const MARKET_INSIGHT_PROMPT: &str = "Generate a short, 1-sentence insight about the \
importance of blockchain in fighting counterfeit pharmaceuticals or luxury goods in India \
for a dashboard.";

/// Prompt for the consumer-facing authenticity summary.
///
/// `history` is taken in store order (newest first) and rendered oldest first.
pub fn analysis_prompt(product: &Product, history: &[Transaction]) -> String {
    let mut journey = String::new();
    for tx in history.iter().rev() {
        let _ = writeln!(
            journey,
            "- {}: {} by {} at {}",
            tx.timestamp.format("%Y-%m-%d %H:%M"),
            tx.action,
            tx.actor,
            tx.location
        );
    }
    if journey.is_empty() {
        journey.push_str("- (no recorded movements)\n");
    }

    format!(
        "You are a Supply Chain Integrity AI for \"TrueChain India\".\n\
         Analyze the following product journey to verify its authenticity and safety for the consumer.\n\
         \n\
         Product: {name} ({category})\n\
         Batch: {batch}\n\
         Manufacturer: {manufacturer}\n\
         Status: {status}\n\
         \n\
         Blockchain Ledger History:\n\
         {journey}\n\
         Please provide a concise, reassuring summary (max 80 words) for the consumer scanning this product.\n\
         If the chain looks complete (Manufacturer -> ... -> Retail), confirm it is Authentic.\n\
         Mention key safety aspects (e.g., temperature control for drugs, origin for luxury) if relevant to the category.\n\
         Do not use Markdown formatting (bold/italic), just plain text.",
        name = product.name,
        category = product.category,
        batch = product.batch_number,
        manufacturer = product.manufacturer,
        status = product.status,
        journey = journey,
    )
}
