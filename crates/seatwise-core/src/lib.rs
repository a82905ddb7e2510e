//! Seatwise Core — error type, configuration, domain model.

pub mod config;
pub mod error;
pub mod model;

pub use config::{SeatwiseConfig, StoreConfig};
pub use error::{Error, Result};
pub use model::{Booking, Conversation, ConversationQuery, Customer, Reservation};
