//! HTTP route handlers — matches the reservation API surface.

pub mod bookings;
pub mod conversations;
pub mod customers;
pub mod reservations;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use seatwise_core::Error;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(reservations::routes())
        .merge(customers::routes())
        .merge(bookings::routes())
        .merge(conversations::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Map a service error onto an HTTP status with a JSON detail body.
pub(crate) fn error_response(err: Error) -> (StatusCode, Json<serde_json::Value>) {
    let status = match &err {
        Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Store(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let (status, _) = error_response(Error::Validation("bad".into()));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = error_response(Error::NotFound("missing".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = error_response(Error::Store("rejected".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response(Error::Ledger("disk".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_body_carries_detail() {
        let (_, Json(body)) = error_response(Error::Store("insert into bookings returned 400".into()));
        assert_eq!(
            body["error"],
            "Store error: insert into bookings returned 400"
        );
    }
}
