//! Customer routes — passthrough create against the remote store.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use seatwise_core::Customer;
use seatwise_store::tables;

use crate::routes::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/customer", post(add_customer))
}

async fn add_customer(
    State(state): State<Arc<AppState>>,
    Json(customer): Json<Customer>,
) -> impl IntoResponse {
    if let Err(err) = customer.validate() {
        return error_response(err);
    }
    let record = match serde_json::to_value(&customer) {
        Ok(value) => value,
        Err(err) => return error_response(err.into()),
    };
    match state.store.insert(tables::CUSTOMERS, record).await {
        Ok(created) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Customer added",
                "customer": created,
            })),
        ),
        Err(err) => error_response(err),
    }
}
