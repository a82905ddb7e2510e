//! Shared application state.

use std::sync::Arc;

use seatwise_ledger::Ledger;
use seatwise_reserve::ReservationOrchestrator;
use seatwise_store::EntityStore;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub store: Arc<dyn EntityStore>,
    pub orchestrator: ReservationOrchestrator,
}

impl AppState {
    pub fn new(ledger: Ledger, store: Arc<dyn EntityStore>) -> Self {
        let ledger = Arc::new(ledger);
        let orchestrator = ReservationOrchestrator::new(ledger.clone(), store.clone());
        Self {
            ledger,
            store,
            orchestrator,
        }
    }
}
