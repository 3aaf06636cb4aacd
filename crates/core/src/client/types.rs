//! Types shared by the ticket status client.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::api::ApiError;
use crate::status::{TicketStatus, TicketView};

/// Errors returned by client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("No launch parameters available to rejoin the queue")]
    MissingLaunchContext,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// How `mount` found its ticket context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// Launch parameters were supplied and persisted.
    Launched,
    /// No launch parameters; resumed from the persisted cookie.
    Resumed,
    /// Neither launch parameters nor a persisted cookie.
    NoTicketContext,
}

/// Point-in-time copy of everything the page displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TicketSnapshot {
    /// Ticket id confirmed by the last successful poll.
    pub ticket_id: Option<String>,
    /// Queue the ticket currently sits in, per the last successful poll.
    pub queue_id: Option<String>,
    /// Number printed on the ticket.
    pub ticket_number: Option<String>,
    pub status: TicketStatus,
    /// Tickets ahead; `Some(-1)` when the ticket is not in the queue.
    pub tickets_ahead: Option<i64>,
    /// "name, contact" label, when the backend provided one.
    pub display_info: Option<String>,
    /// Time of the last successful poll.
    pub last_updated: Option<DateTime<Utc>>,
    /// View resolved from `status` and `tickets_ahead`.
    pub view: TicketView,
}

impl TicketSnapshot {
    /// Equal in everything but the last-updated time.
    pub fn same_content(&self, other: &TicketSnapshot) -> bool {
        self.ticket_id == other.ticket_id
            && self.queue_id == other.queue_id
            && self.ticket_number == other.ticket_number
            && self.status == other.status
            && self.tickets_ahead == other.tickets_ahead
            && self.display_info == other.display_info
            && self.view == other.view
    }
}

/// Leaves the ticket page.
pub trait Navigator: Send + Sync {
    /// Go to the landing page.
    fn navigate_to_landing(&self);
}
