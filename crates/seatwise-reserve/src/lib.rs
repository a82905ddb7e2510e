//! Seatwise Reserve — the reservation orchestrator.
//!
//! Coordinates one logical reservation across the ledger and two remote
//! store tables, presenting an all-or-nothing outcome to the caller.

mod orchestrator;

pub use orchestrator::{ReservationOrchestrator, ReservationOutcome};
