//! Orchestrator — multi-step reservation write with best-effort compensation.
//!
//! Step order: availability check, ledger append, customer insert, booking
//! insert. The ledger is written first because it is the source of truth for
//! slot claims, and rolled back last: it must never retain a row whose remote
//! store state is incomplete. True atomicity across the two stores is not
//! attempted; a crash between the ledger append and the compensating delete
//! leaves an orphaned ledger row.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use seatwise_core::{Booking, Customer, Reservation, Result};
use seatwise_ledger::Ledger;
use seatwise_store::{tables, EntityStore};

/// Outcome of a reservation submission. A taken slot is a normal negative
/// result, not an error.
#[derive(Debug)]
pub enum ReservationOutcome {
    Booked {
        reservation: Reservation,
        customer_response: Value,
        booking_response: Value,
    },
    SlotTaken,
}

/// Coordinates one reservation across the ledger and the remote store.
pub struct ReservationOrchestrator {
    ledger: Arc<Ledger>,
    store: Arc<dyn EntityStore>,
}

impl ReservationOrchestrator {
    pub fn new(ledger: Arc<Ledger>, store: Arc<dyn EntityStore>) -> Self {
        Self { ledger, store }
    }

    /// Submit one reservation.
    ///
    /// On a dependency failure the just-appended ledger row is removed and
    /// the original error is returned unchanged; compensation failures are
    /// logged and never mask it.
    pub async fn submit_reservation(&self, request: Reservation) -> Result<ReservationOutcome> {
        request.validate()?;

        // 1 + 2) Slot check and ledger append in one critical section.
        if !self.ledger.append_if_available(&request)? {
            return Ok(ReservationOutcome::SlotTaken);
        }

        // 3) Customer insert.
        let customer = Customer::from_reservation(&request);
        let customer_response = match self
            .store
            .insert(tables::CUSTOMERS, serde_json::to_value(&customer)?)
            .await
        {
            Ok(created) => created,
            Err(err) => {
                self.rollback_ledger();
                return Err(err);
            }
        };

        // 4) Booking insert. On failure, undo the customer first, then the
        // ledger row, and surface the booking error.
        let booking = Booking::from_reservation(&request);
        let booking_response = match self
            .store
            .insert(tables::BOOKINGS, serde_json::to_value(&booking)?)
            .await
        {
            Ok(created) => created,
            Err(err) => {
                self.cleanup_customer(&request).await;
                self.rollback_ledger();
                return Err(err);
            }
        };

        info!(
            "Reservation booked: {} {} for {}",
            request.date, request.time, request.name
        );

        Ok(ReservationOutcome::Booked {
            reservation: request,
            customer_response,
            booking_response,
        })
    }

    /// Best-effort removal of the customer created in step 3. Looks the
    /// customer up by contact, deletes the most recent match by identifier,
    /// falling back to an exact name+contact delete when no identifier is
    /// present. Its own failures are logged and swallowed.
    async fn cleanup_customer(&self, request: &Reservation) {
        let filters = [("contact", request.contact.clone())];
        let rows = match self.store.select(tables::CUSTOMERS, &filters).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!(
                    "Customer lookup during cleanup failed for contact {}: {}",
                    request.contact, err
                );
                return;
            }
        };

        let Some(candidate) = rows.last() else {
            return;
        };

        let id = candidate
            .get("id")
            .and_then(Value::as_i64)
            .or_else(|| candidate.get("customer_id").and_then(Value::as_i64));

        let result = match id {
            Some(id) => {
                self.store
                    .delete(tables::CUSTOMERS, &[("id", id.to_string())])
                    .await
            }
            None => {
                self.store
                    .delete(
                        tables::CUSTOMERS,
                        &[
                            ("name", request.name.clone()),
                            ("contact", request.contact.clone()),
                        ],
                    )
                    .await
            }
        };

        if let Err(err) = result {
            warn!(
                "Customer cleanup failed for contact {}: {}",
                request.contact, err
            );
        }
    }

    /// Remove the row appended in step 2. A rollback failure must not mask
    /// the error that triggered it.
    fn rollback_ledger(&self) {
        if let Err(err) = self.ledger.remove_last() {
            warn!("Ledger rollback failed: {}", err);
        }
    }
}
