use std::time::Duration;

use truechain_ledger::domain::summary::MARKET_INSIGHT_PROMPT;
use truechain_ledger::infra::config;
use truechain_ledger::{GeminiClient, LedgerConfig};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--skip-ai]\n\
         \n\
         Reads (all optional):\n\
           BIND_ADDR, GEMINI_API_KEY (or API_KEY), GEMINI_MODEL, GEMINI_API_BASE,\n\
           SUMMARY_TIMEOUT_MS, SCAN_DELAY_MS, MINT_MANUFACTURER, MINT_ORIGIN_LOCATION,\n\
           DEFAULT_ACTOR, SEED_DEMO_DATA\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let skip_ai = args.iter().any(|a| a == "--skip-ai");

    // Force-read config (nice error messages on invalid values)
    let ledger_config = LedgerConfig::from_env()?;

    println!("> Preflight:");
    println!("  BIND_ADDR={}", config::bind_addr());
    println!("  MINT_MANUFACTURER={}", ledger_config.manufacturer);
    println!("  MINT_ORIGIN_LOCATION={}", ledger_config.origin_location);
    println!("  DEFAULT_ACTOR={}", ledger_config.default_actor);
    println!("  SCAN_DELAY_MS={}", ledger_config.scan_delay.as_millis());
    println!("  SUMMARY_TIMEOUT_MS={}", ledger_config.summary_timeout.as_millis());
    println!("  SEED_DEMO_DATA={}", ledger_config.seed_demo_data);
    println!("  GEMINI_API_BASE={}", config::gemini_api_base());
    println!("  GEMINI_MODEL={}", config::gemini_model());

    if skip_ai {
        println!("> Skipping AI backend probe (--skip-ai).");
        println!("> Preflight OK.");
        return Ok(());
    }

    // Probe with a longer budget than a live request gets.
    let probe_timeout = ledger_config.summary_timeout.max(Duration::from_secs(30));
    let Some(client) = GeminiClient::from_env(probe_timeout)? else {
        println!("  GEMINI_API_KEY: missing (verification will report fallback analysis text)");
        println!("> Preflight OK (offline analysis).");
        return Ok(());
    };
    println!("  GEMINI_API_KEY: present");

    let insight = client.generate(MARKET_INSIGHT_PROMPT).await?;
    if insight.trim().is_empty() {
        println!("  Model {} responded with empty text.", client.model());
    } else {
        println!("  Model {} responded: {}", client.model(), insight.trim());
    }

    println!("> Preflight OK.");
    Ok(())
}
