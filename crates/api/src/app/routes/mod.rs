use axum::{
    Router,
    routing::{get, post},
};

pub mod gate;
pub mod records;
pub mod system;

/// Router for the gate endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/recognize", post(gate::recognize))
        .route("/records", get(records::today))
}
