use crate::transport::http::handlers::common::ok_response;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::{Path, State};
use axum::response::IntoResponse;

// Both endpoints answer 200 even for unknown or flagged products: the verdict lives in the
// report, not in the status code.

#[utoipa::path(
    get,
    path = "/api/verify/{id}",
    params(
        ("id" = String, Path, description = "Scanned or typed product id")
    ),
    responses(
        (status = 200, description = "Verification report (see data.verified / data.outcome)", body = ApiResponse)
    )
)]
pub async fn verify_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    ok_response(&state.ledger.verify(&id).await)
}

#[utoipa::path(
    post,
    path = "/api/scan/capture",
    responses(
        (status = 200, description = "Simulated camera capture followed by verification", body = ApiResponse)
    )
)]
pub async fn capture_handler(State(state): State<AppState>) -> impl IntoResponse {
    ok_response(&state.ledger.capture_and_verify().await)
}
