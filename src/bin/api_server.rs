// src/bin/api_server.rs

use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;
use truechain_ledger::infra::config;
use truechain_ledger::transport;
use truechain_ledger::{GeminiClient, LedgerConfig, LedgerService, OfflineSummarizer, Summarizer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let ledger_config = LedgerConfig::from_env()?;
    tracing::info!(
        manufacturer = %ledger_config.manufacturer,
        origin = %ledger_config.origin_location,
        scan_delay_ms = ledger_config.scan_delay.as_millis() as u64,
        summary_timeout_ms = ledger_config.summary_timeout.as_millis() as u64,
        seed_demo_data = ledger_config.seed_demo_data,
        "configuration loaded"
    );

    // --- Summary backend ---
    let summarizer: Arc<dyn Summarizer> = match GeminiClient::from_env(ledger_config.summary_timeout)? {
        Some(client) => {
            tracing::info!(model = client.model(), "AI analysis enabled");
            Arc::new(client)
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set; AI analysis will use fallback text");
            Arc::new(OfflineSummarizer)
        }
    };

    // --- Service Initialization ---
    let ledger = LedgerService::new(ledger_config, summarizer)?;
    let app_state = transport::http::AppState {
        ledger: Arc::new(ledger),
    };

    // --- API Server Initialization ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on http://{}", listener.local_addr()?);
    tracing::info!("Swagger UI available at /swagger-ui");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received (Ctrl+C)");
        }
    }

    Ok(())
}
