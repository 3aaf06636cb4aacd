//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the ticket backend and the
//! navigator, so the status client can be exercised without a real server.
//!
//! # Example
//!
//! ```rust,ignore
//! use queuewatch_core::testing::{fixtures, MockNavigator, MockTicketApi};
//!
//! let api = MockTicketApi::new();
//! api.set_status(fixtures::status_response("Main", 3)).await;
//!
//! // Hand `api` to a TicketStatusClient, then inspect the calls it made
//! let calls = api.calls().await;
//! ```

mod mock_navigator;
mod mock_ticket_api;

pub use mock_navigator::MockNavigator;
pub use mock_ticket_api::{MockTicketApi, RecordedCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::api::{TicketDesc, TicketDescField, TicketStatusResponse};
    use crate::launch::LaunchParams;

    /// Launch parameters for ticket `t-1` in queue `q-1`, number 42.
    pub fn launch_params() -> LaunchParams {
        LaunchParams {
            ticket: "t-1".to_string(),
            queue: "q-1".to_string(),
            ticket_number: "42".to_string(),
        }
    }

    /// A status response for queue `q-1` with no ticket description.
    pub fn status_response(queue_name: &str, tickets_ahead: i64) -> TicketStatusResponse {
        TicketStatusResponse {
            queue_id: Some("q-1".to_string()),
            queue_name: queue_name.to_string(),
            ticket_desc: TicketDescField::default(),
            number_of_tickets_ahead: tickets_ahead,
            status: None,
        }
    }

    /// A status response carrying a ticket description.
    pub fn status_response_with_desc(
        queue_name: &str,
        tickets_ahead: i64,
        name: &str,
        contact: &str,
    ) -> TicketStatusResponse {
        TicketStatusResponse {
            ticket_desc: TicketDescField::Desc(TicketDesc {
                name: name.to_string(),
                contact: contact.to_string(),
            }),
            ..status_response(queue_name, tickets_ahead)
        }
    }
}
