//! Booking routes — passthrough create against the remote store.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use seatwise_core::Booking;
use seatwise_store::tables;

use crate::routes::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/booking", post(add_booking))
}

async fn add_booking(
    State(state): State<Arc<AppState>>,
    Json(booking): Json<Booking>,
) -> impl IntoResponse {
    if let Err(err) = booking.validate() {
        return error_response(err);
    }
    let record = match serde_json::to_value(&booking) {
        Ok(value) => value,
        Err(err) => return error_response(err.into()),
    };
    match state.store.insert(tables::BOOKINGS, record).await {
        Ok(created) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Booking added",
                "booking": created,
            })),
        ),
        Err(err) => error_response(err),
    }
}
