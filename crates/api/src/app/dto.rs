use serde::{Deserialize, Serialize};

use hostelgate_access::{AccessEvent, Action};
use hostelgate_roster::PersonRecord;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RecognizeRequest {
    /// Face descriptor extracted from the captured frame.
    pub encoding: Vec<f32>,
    #[serde(default = "default_action")]
    pub action: String,
}

fn default_action() -> String {
    Action::Entry.as_str().to_string()
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct RecognizeResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<PersonRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl RecognizeResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            student: None,
            time: None,
            date: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    pub date: String,
    pub records: Vec<AccessEvent>,
}

// -------------------------
// Parsing helpers
// -------------------------

pub fn parse_action(s: &str) -> Result<Action, axum::response::Response> {
    s.parse::<Action>().map_err(|e| {
        errors::json_error(
            axum::http::StatusCode::BAD_REQUEST,
            "invalid_action",
            e.to_string(),
        )
    })
}
