use crate::transport::http::handlers::common::ok_response;
use crate::transport::http::types::{ApiResponse, AppState, InsightResponse};
use axum::extract::State;
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/api/insights/market",
    responses(
        (status = 200, description = "One-sentence market insight (fallback text when the AI backend is down)", body = ApiResponse)
    )
)]
pub async fn market_insight_handler(State(state): State<AppState>) -> impl IntoResponse {
    ok_response(&InsightResponse {
        insight: state.ledger.market_insight().await,
    })
}
