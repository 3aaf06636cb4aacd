//! Ticket status derivation and the view cascade.
//!
//! A poll response is reduced to a `TicketStatus`, and the status together
//! with the tickets-ahead count resolves to exactly one `TicketView`.

mod derive;
mod types;

pub use derive::{derive_status, status_from_queue_name, ALERT_MARKER, DONE_MARKER, MISSED_MARKER};
pub use types::*;
