//! Offline command-line entrypoint.
//!
//! Runs the ledger in-process against the demo catalogue, without the HTTP layer or an AI
//! backend. Handy for checking what a scan of a given id would report.
//!
//!   truechain-ledger verify <PRODUCT_ID>
//!   truechain-ledger ledger
//!   truechain-ledger demo

use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use truechain_ledger::{
    Category, LedgerAction, LedgerConfig, LedgerService, MintRequest, MovementRequest,
    OfflineSummarizer, VerificationReport,
};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage:\n\
           truechain-ledger verify <PRODUCT_ID>   verify one id against the demo ledger\n\
           truechain-ledger ledger                print every block, newest first\n\
           truechain-ledger demo                  mint, move and verify a fresh product\n"
    );
    std::process::exit(2);
}

fn print_report(report: &VerificationReport) {
    println!("> Scan {}: {}", report.scanned_id, report.message);
    println!("  verified={} chain_intact={}", report.verified, report.chain_intact);
    if let Some(product) = &report.product {
        println!(
            "  {} [{}] batch={} status={} at {}",
            product.name,
            product.category.as_str(),
            product.batch_number,
            product.status.as_str(),
            product.current_location
        );
    }
    for tx in report.history.iter().rev() {
        println!(
            "  {} {:<22} {:<28} {} ({})",
            tx.timestamp.format("%Y-%m-%d %H:%M"),
            tx.action.as_str(),
            tx.location,
            tx.actor,
            &tx.hash[..tx.hash.len().min(14)]
        );
    }
    println!("  analysis: {}", report.analysis);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = LedgerConfig {
        seed_demo_data: true,
        ..LedgerConfig::from_env()?
    };
    let ledger = LedgerService::new(config, Arc::new(OfflineSummarizer))?;

    match args.first().map(String::as_str) {
        Some("verify") => {
            let Some(id) = args.get(1) else { usage_and_exit() };
            print_report(&ledger.verify(id).await);
        }
        Some("ledger") => {
            let transactions = ledger.transactions().await;
            println!("> {} blocks", transactions.len());
            for tx in &transactions {
                println!(
                    "  {} {} {} prev={}",
                    tx.hash,
                    tx.product_id,
                    tx.action.as_str(),
                    tx.previous_hash
                );
            }
        }
        Some("demo") => {
            let receipt = ledger
                .mint(MintRequest::new("Organic Green Tea", Category::Fmcg, "BATCH-CLI-01"))
                .await?;
            println!("> Minted {} (genesis {})", receipt.product.id, receipt.genesis.hash);

            for (action, location) in [
                (LedgerAction::Shipped, "Nhava Sheva Port, Mumbai"),
                (LedgerAction::ReceivedDistributor, "Central Hub, Pune"),
                (LedgerAction::RetailStock, "Apollo Store, Bengaluru"),
            ] {
                ledger
                    .record_movement(MovementRequest::new(&receipt.product.id, action, location))
                    .await?;
            }
            print_report(&ledger.verify(&receipt.product.id).await);
        }
        _ => usage_and_exit(),
    }

    Ok(())
}
