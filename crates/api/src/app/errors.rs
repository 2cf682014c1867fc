use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use hostelgate_infra::LedgerError;

use crate::app::services::ServiceError;

/// Operational failures only. Rejections and unmatched faces are normal
/// responses, not errors.
pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Ledger(LedgerError::Store(e)) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
        ServiceError::Ledger(LedgerError::Lock(msg)) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "lock_error", msg)
        }
        ServiceError::Ledger(LedgerError::Invariant(msg)) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "invariant_violation", msg)
        }
        ServiceError::Join(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
