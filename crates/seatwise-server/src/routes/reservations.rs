//! Reservation routes — the multi-step orchestrated write plus the
//! availability read.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use seatwise_core::Reservation;
use seatwise_reserve::ReservationOutcome;

use crate::routes::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reservation", post(add_reservation))
        .route("/availability", get(check_availability))
}

async fn add_reservation(
    State(state): State<Arc<AppState>>,
    Json(request): Json<Reservation>,
) -> impl IntoResponse {
    match state.orchestrator.submit_reservation(request).await {
        Ok(ReservationOutcome::Booked {
            reservation,
            customer_response,
            booking_response,
        }) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Reservation, customer and booking added successfully",
                "reservation": reservation,
                "customer_response": customer_response,
                "booking_response": booking_response,
            })),
        ),
        Ok(ReservationOutcome::SlotTaken) => (
            StatusCode::OK,
            Json(json!({ "success": false, "message": "Slot not available" })),
        ),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
struct AvailabilityParams {
    date: String,
    time: String,
}

async fn check_availability(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AvailabilityParams>,
) -> impl IntoResponse {
    match state.ledger.is_available(&params.date, &params.time) {
        Ok(available) => (StatusCode::OK, Json(json!({ "available": available }))),
        Err(err) => error_response(err),
    }
}
