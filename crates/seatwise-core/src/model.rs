//! Domain model — reservations, customers, bookings, conversation logs.
//!
//! A reservation claims one (date, time) slot. A successful reservation also
//! produces one Customer and one Booking row in the remote entity store.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One reservation request / ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub name: String,
    pub contact: String,
    pub guest_count: u32,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Time of day, `HH:MM` (24-hour).
    pub time: String,
}

impl Reservation {
    /// Validate field shapes before any write happens.
    pub fn validate(&self) -> Result<()> {
        validate_text("name", &self.name)?;
        validate_text("contact", &self.contact)?;
        if self.guest_count == 0 {
            return Err(Error::Validation("guest_count must be at least 1".into()));
        }
        validate_slot(&self.date, &self.time)
    }
}

/// A free-text field must be non-empty and printable; control characters
/// would corrupt the line-oriented ledger.
fn validate_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{} must not be empty", field)));
    }
    if value.chars().any(char::is_control) {
        return Err(Error::Validation(format!(
            "{} must not contain control characters",
            field
        )));
    }
    Ok(())
}

/// Validate a (date, time) slot pair.
pub fn validate_slot(date: &str, time: &str) -> Result<()> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| Error::Validation(format!("invalid date '{}', expected YYYY-MM-DD", date)))?;
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| Error::Validation(format!("invalid time '{}', expected HH:MM", time)))?;
    Ok(())
}

/// Customer record stored remotely; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub contact: String,
    pub guest_count: u32,
}

impl Customer {
    pub fn from_reservation(reservation: &Reservation) -> Self {
        Self {
            name: reservation.name.clone(),
            contact: reservation.contact.clone(),
            guest_count: reservation.guest_count,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_text("name", &self.name)?;
        validate_text("contact", &self.contact)
    }
}

/// Booking record stored remotely; created after its Customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub name: String,
    pub contact: String,
    pub date: String,
    pub time: String,
}

impl Booking {
    pub fn from_reservation(reservation: &Reservation) -> Self {
        Self {
            name: reservation.name.clone(),
            contact: reservation.contact.clone(),
            date: reservation.date.clone(),
            time: reservation.time.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_text("name", &self.name)?;
        validate_text("contact", &self.contact)?;
        validate_slot(&self.date, &self.time)
    }
}

/// Conversation log entry, tied to an existing Customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub customer_id: i64,
    pub category: String,
    pub intent: String,
    pub transcript: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenges: Option<String>,
    /// Optional customer rating, 1 through 5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_ratings: Option<u8>,
}

impl Conversation {
    /// Validate before any store interaction.
    pub fn validate(&self) -> Result<()> {
        if self.customer_id <= 0 {
            return Err(Error::Validation("customer_id must be positive".into()));
        }
        if let Some(rating) = self.customer_ratings {
            if !(1..=5).contains(&rating) {
                return Err(Error::Validation(format!(
                    "customer_ratings must be in [1, 5], got {}",
                    rating
                )));
            }
        }
        Ok(())
    }
}

/// Query parameters for conversation lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversationQuery {
    pub customer_id: Option<i64>,
    pub conversation_id: Option<i64>,
}
