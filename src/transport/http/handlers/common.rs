use crate::domain::model::UserRole;
use crate::error::LedgerError;
use crate::transport::http::types::{ApiResponse, ROLE_HEADER};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }),
    )
        .into_response()
}

pub fn ok_response<T: Serialize>(data: &T) -> Response {
    match serde_json::to_value(data) {
        Ok(value) => (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data: Some(value),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to serialize response: {}", e),
        ),
    }
}

pub fn ledger_error_status(err: &LedgerError) -> StatusCode {
    match err {
        LedgerError::UnknownProduct(_) => StatusCode::NOT_FOUND,
        LedgerError::DuplicateProduct(_) | LedgerError::ProductFlagged(_) => StatusCode::CONFLICT,
        LedgerError::IdExhausted(_) => StatusCode::SERVICE_UNAVAILABLE,
        LedgerError::UnknownAction(_)
        | LedgerError::UnknownCategory(_)
        | LedgerError::UnknownRole(_)
        | LedgerError::EmptyField(_) => StatusCode::BAD_REQUEST,
    }
}

pub fn ledger_error_response(err: LedgerError) -> Response {
    error_response(ledger_error_status(&err), err.to_string())
}

/// Reads the caller's role from [`ROLE_HEADER`]; a missing header means consumer.
pub fn caller_role(headers: &HeaderMap) -> Result<UserRole, LedgerError> {
    match headers.get(ROLE_HEADER) {
        None => Ok(UserRole::Consumer),
        Some(value) => value
            .to_str()
            .map_err(|_| LedgerError::UnknownRole("<non-ascii>".to_string()))?
            .parse(),
    }
}

/// Write endpoints are limited to supply-chain roles.
pub fn require_supply_chain_role(headers: &HeaderMap) -> Result<UserRole, Response> {
    let role = caller_role(headers).map_err(ledger_error_response)?;
    if role.can_manage_supply_chain() {
        Ok(role)
    } else {
        Err(error_response(
            StatusCode::FORBIDDEN,
            "Restricted access: consumers cannot modify the supply chain. Switch to a manufacturer, distributor or retailer role.",
        ))
    }
}
