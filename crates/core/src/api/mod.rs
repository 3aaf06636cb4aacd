//! Ticket backend abstraction.
//!
//! This module provides a `TicketApi` trait covering the three calls the
//! queue page makes against the ticket endpoint (status, leave, rejoin),
//! plus the reqwest-backed `HttpTicketApi`.

mod http;
mod types;

pub use http::HttpTicketApi;
pub use types::*;
