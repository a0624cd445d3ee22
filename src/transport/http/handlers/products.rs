use crate::domain::ledger::MintRequest;
use crate::domain::model::Category;
use crate::transport::http::handlers::common::{
    error_response, ledger_error_response, ok_response, require_supply_chain_role,
};
use crate::transport::http::types::{json_422, ApiResponse, AppState, MintProductRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products on the ledger", body = ApiResponse)
    )
)]
pub async fn list_products_handler(State(state): State<AppState>) -> impl IntoResponse {
    ok_response(&state.ledger.products().await)
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product id (e.g. TC-IN-7829)")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse),
        (status = 404, description = "No product with this id", body = ApiResponse)
    )
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.ledger.product(&id).await {
        Some(product) => ok_response(&product),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("Product '{}' is not on the ledger", id),
        ),
    }
}

#[utoipa::path(
    post,
    path = "/api/products/mint",
    request_body = MintProductRequest,
    params(
        ("x-truechain-role" = Option<String>, Header, description = "Manufacturer, Distributor or Retailer")
    ),
    responses(
        (status = 200, description = "Product and genesis transaction minted", body = ApiResponse),
        (status = 400, description = "Invalid field values", body = ApiResponse),
        (status = 403, description = "Consumers cannot mint", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn mint_product_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<MintProductRequest>, JsonRejection>,
) -> impl IntoResponse {
    if let Err(resp) = require_supply_chain_role(&headers) {
        return resp;
    }

    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(
                e,
                "{\"name\": ..., \"category\": ..., \"batchNumber\": ...}",
            )
            .into_response()
        }
    };

    let category = match request.category.parse::<Category>() {
        Ok(c) => c,
        Err(e) => return ledger_error_response(e),
    };

    let mint = MintRequest {
        name: request.name,
        category,
        batch_number: request.batch_number,
        description: request.description,
        expiry_date: request.expiry_date,
    };

    match state.ledger.mint(mint).await {
        Ok(receipt) => ok_response(&receipt),
        Err(e) => ledger_error_response(e),
    }
}
