use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Today's ledger rows in the order they were written.
pub async fn today(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.today_records().await {
        Ok((date, records)) => (
            StatusCode::OK,
            Json(dto::RecordsResponse {
                date: date.to_string(),
                records,
            }),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
