use crate::api::{ReportedStatus, TicketStatusResponse};

use super::TicketStatus;

pub const ALERT_MARKER: &str = "[ALERT]";
pub const DONE_MARKER: &str = "[DONE]";
pub const MISSED_MARKER: &str = "[MISSED]";

/// Derive the ticket status from a poll response.
///
/// An explicit `status` field wins. Otherwise the queue-name markers are
/// checked in priority order.
pub fn derive_status(response: &TicketStatusResponse) -> TicketStatus {
    match response.status {
        Some(reported) => reported.into(),
        None => status_from_queue_name(&response.queue_name),
    }
}

/// Marker convention: `[ALERT]` over `[DONE]` over `[MISSED]`, else pending.
pub fn status_from_queue_name(queue_name: &str) -> TicketStatus {
    if queue_name.contains(ALERT_MARKER) {
        TicketStatus::Alerted
    } else if queue_name.contains(DONE_MARKER) {
        TicketStatus::Served
    } else if queue_name.contains(MISSED_MARKER) {
        TicketStatus::Missed
    } else {
        TicketStatus::Pending
    }
}

impl From<ReportedStatus> for TicketStatus {
    fn from(status: ReportedStatus) -> Self {
        match status {
            ReportedStatus::Alerted => TicketStatus::Alerted,
            ReportedStatus::Served => TicketStatus::Served,
            ReportedStatus::Missed => TicketStatus::Missed,
            ReportedStatus::Pending => TicketStatus::Pending,
        }
    }
}
