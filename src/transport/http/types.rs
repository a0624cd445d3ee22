use crate::app::ledger_service::LedgerService;
use crate::domain::model::Transaction;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

/// Header carrying the caller's portal role. Missing means consumer.
pub const ROLE_HEADER: &str = "x-truechain-role";

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<LedgerService>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MintProductRequest {
    pub name: String,
    /// One of Pharmaceuticals, Luxury, FMCG, Electronics.
    pub category: String,
    pub batch_number: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordTransactionRequest {
    pub product_id: String,
    /// e.g. SHIPPED, RECEIVED_DISTRIBUTOR, QUALITY_CHECK_PASSED, RETAIL_STOCK.
    pub action: String,
    pub location: String,
    /// Defaults to the configured logistics actor.
    #[serde(default)]
    pub actor: Option<String>,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LedgerResponse {
    pub total_blocks: usize,
    /// Newest first.
    pub transactions: Vec<Transaction>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct InsightResponse {
    pub insight: String,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(format!("Invalid JSON body: {} (expected: {})", err, expected)),
        }),
    )
}
