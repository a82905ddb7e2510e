//! Seatwise server — axum HTTP surface for the reservation service.

pub mod routes;
pub mod state;

pub use state::AppState;
