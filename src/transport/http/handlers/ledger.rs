use crate::app::ledger_service::MovementRequest;
use crate::domain::model::LedgerAction;
use crate::transport::http::handlers::common::{
    ledger_error_response, ok_response, require_supply_chain_role,
};
use crate::transport::http::types::{
    json_422, ApiResponse, AppState, LedgerResponse, RecordTransactionRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/ledger",
    responses(
        (status = 200, description = "Every recorded transaction, newest first", body = ApiResponse)
    )
)]
pub async fn list_ledger_handler(State(state): State<AppState>) -> impl IntoResponse {
    let transactions = state.ledger.transactions().await;
    ok_response(&LedgerResponse {
        total_blocks: transactions.len(),
        transactions,
    })
}

#[utoipa::path(
    post,
    path = "/api/ledger/transactions",
    request_body = RecordTransactionRequest,
    params(
        ("x-truechain-role" = Option<String>, Header, description = "Manufacturer, Distributor or Retailer")
    ),
    responses(
        (status = 200, description = "Transaction recorded", body = ApiResponse),
        (status = 400, description = "Unknown action or empty field", body = ApiResponse),
        (status = 403, description = "Consumers cannot record movements", body = ApiResponse),
        (status = 404, description = "Product not on the ledger", body = ApiResponse),
        (status = 409, description = "Product is flagged", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn record_transaction_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<RecordTransactionRequest>, JsonRejection>,
) -> impl IntoResponse {
    if let Err(resp) = require_supply_chain_role(&headers) {
        return resp;
    }

    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(
                e,
                "{\"productId\": ..., \"action\": ..., \"location\": ...}",
            )
            .into_response()
        }
    };

    let action = match request.action.parse::<LedgerAction>() {
        Ok(a) => a,
        Err(e) => return ledger_error_response(e),
    };

    let movement = MovementRequest {
        product_id: request.product_id,
        action,
        location: request.location,
        actor: request.actor,
    };

    match state.ledger.record_movement(movement).await {
        Ok(tx) => ok_response(&tx),
        Err(e) => ledger_error_response(e),
    }
}
