use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use hostelgate_roster::FaceEncoding;

use crate::app::services::{AppServices, GateOutcome};
use crate::app::{dto, errors};

pub async fn recognize(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RecognizeRequest>,
) -> axum::response::Response {
    let action = match dto::parse_action(&body.action) {
        Ok(a) => a,
        Err(resp) => return resp,
    };

    let outcome = match services
        .recognize(FaceEncoding::new(body.encoding), action)
        .await
    {
        Ok(o) => o,
        Err(e) => return errors::service_error_to_response(e),
    };

    let body = match outcome {
        GateOutcome::Recorded { person, recorded } => dto::RecognizeResponse {
            success: true,
            message: format!("{} recorded successfully", recorded.action),
            student: Some(person),
            time: Some(recorded.time.to_string()),
            date: Some(recorded.date.to_string()),
        },
        GateOutcome::Rejected { person, violation } => dto::RecognizeResponse {
            student: Some(person),
            ..dto::RecognizeResponse::failure(violation.reason())
        },
        GateOutcome::Unidentified => {
            dto::RecognizeResponse::failure("face not recognized, please try again")
        }
    };

    (StatusCode::OK, Json(body)).into_response()
}
