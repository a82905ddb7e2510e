//! Seatwise Store — client for the remote entity store.
//!
//! The hosted backend is treated as an opaque collaborator exposing insert,
//! filtered select, and filtered delete over named tables. [`EntityStore`] is
//! the seam; [`RestStore`] is the PostgREST-style HTTP implementation.

mod rest;

use async_trait::async_trait;
use serde_json::Value;

use seatwise_core::Result;

pub use rest::RestStore;

/// Table names used by the service.
pub mod tables {
    pub const CUSTOMERS: &str = "customers";
    pub const BOOKINGS: &str = "bookings";
    pub const CONVERSATIONS: &str = "conversations";
}

/// Equality filters applied to a select or delete, as (column, value) pairs.
pub type Filters<'a> = &'a [(&'a str, String)];

/// Remote entity store operations over named tables.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Insert one record; returns the created record as the store echoed it
    /// (including any server-assigned identifier).
    async fn insert(&self, table: &str, record: Value) -> Result<Value>;

    /// Select records matching all equality filters.
    async fn select(&self, table: &str, filters: Filters<'_>) -> Result<Vec<Value>>;

    /// Delete records matching all equality filters.
    async fn delete(&self, table: &str, filters: Filters<'_>) -> Result<()>;
}
