use crate::app::ledger_service::{MintReceipt, VerificationReport};
use crate::domain::model::{Category, LedgerAction, Product, ProductStatus, Transaction, UserRole};
use crate::domain::verify::VerificationOutcome;
use crate::transport::http::handlers::{health, insights, ledger, products, verify};
use crate::transport::http::types::{
    ApiResponse, AppState, InsightResponse, LedgerResponse, MintProductRequest,
    RecordTransactionRequest,
};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        products::list_products_handler,
        products::get_product_handler,
        products::mint_product_handler,
        ledger::list_ledger_handler,
        ledger::record_transaction_handler,
        verify::verify_handler,
        verify::capture_handler,
        insights::market_insight_handler
    ),
    components(schemas(
        ApiResponse,
        MintProductRequest,
        RecordTransactionRequest,
        LedgerResponse,
        InsightResponse,
        MintReceipt,
        VerificationReport,
        VerificationOutcome,
        Product,
        ProductStatus,
        Category,
        Transaction,
        LedgerAction,
        UserRole
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/products", get(products::list_products_handler))
        .route("/api/products/mint", post(products::mint_product_handler))
        .route("/api/products/:id", get(products::get_product_handler))
        .route("/api/ledger", get(ledger::list_ledger_handler))
        .route(
            "/api/ledger/transactions",
            post(ledger::record_transaction_handler),
        )
        .route("/api/verify/:id", get(verify::verify_handler))
        .route("/api/scan/capture", post(verify::capture_handler))
        .route("/api/insights/market", get(insights::market_insight_handler))
        .with_state(app_state)
}
