//! Ticket status client.
//!
//! `TicketStatusClient` owns the derived state of the tracked ticket and the
//! two user actions; `TicketPoller` re-polls it on a fixed interval.

mod poller;
mod status_client;
mod types;

pub use poller::TicketPoller;
pub use status_client::TicketStatusClient;
pub use types::*;
