//! Types for ticket backend operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to the ticket backend.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    Request(String),
}

/// Explicit ticket status, for backends that report it directly instead of
/// encoding it in the queue name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportedStatus {
    Alerted,
    Served,
    Missed,
    Pending,
}

/// Contact details attached to a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDesc {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact: String,
}

impl TicketDesc {
    /// Human-readable label shown under the ticket number.
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.contact)
    }
}

/// `ticketDesc` is either an object or the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TicketDescField {
    Desc(TicketDesc),
    Empty(String),
}

impl TicketDescField {
    /// Returns the description when one was provided.
    pub fn desc(&self) -> Option<&TicketDesc> {
        match self {
            TicketDescField::Desc(desc) => Some(desc),
            TicketDescField::Empty(_) => None,
        }
    }
}

impl Default for TicketDescField {
    fn default() -> Self {
        TicketDescField::Empty(String::new())
    }
}

/// Response body of a status read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStatusResponse {
    /// Queue the ticket currently sits in. May differ from the launch queue.
    #[serde(default)]
    pub queue_id: Option<String>,
    /// Queue display name, possibly carrying `[ALERT]`, `[DONE]` or `[MISSED]`.
    pub queue_name: String,
    #[serde(default)]
    pub ticket_desc: TicketDescField,
    /// Tickets ahead of this one; -1 when the ticket is not in the queue.
    pub number_of_tickets_ahead: i64,
    /// Authoritative status when the backend supports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportedStatus>,
}

/// Client for the ticket endpoint.
#[async_trait]
pub trait TicketApi: Send + Sync {
    /// Returns the name of this backend.
    fn name(&self) -> &str;

    /// Read the current status of a ticket in a queue.
    async fn get_status(
        &self,
        ticket_id: &str,
        queue_id: &str,
    ) -> Result<TicketStatusResponse, ApiError>;

    /// Remove a ticket from whatever queue it is in.
    async fn leave(&self, ticket_id: &str) -> Result<(), ApiError>;

    /// Put a ticket back into the given queue.
    async fn rejoin(&self, ticket_id: &str, queue_id: &str) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_response() {
        let body = json!({
            "queueId": "q-2",
            "queueName": "[ALERT] Counter 2",
            "ticketDesc": { "name": "Tan Ah Kow", "contact": "91234567" },
            "numberOfTicketsAhead": 4
        });
        let response: TicketStatusResponse = serde_json::from_value(body).unwrap();

        assert_eq!(response.queue_id.as_deref(), Some("q-2"));
        assert_eq!(response.queue_name, "[ALERT] Counter 2");
        assert_eq!(response.number_of_tickets_ahead, 4);
        assert_eq!(
            response.ticket_desc.desc().map(TicketDesc::label),
            Some("Tan Ah Kow, 91234567".to_string())
        );
        assert!(response.status.is_none());
    }

    #[test]
    fn test_parse_empty_ticket_desc() {
        let body = json!({
            "queueId": "q-1",
            "queueName": "Main",
            "ticketDesc": "",
            "numberOfTicketsAhead": -1
        });
        let response: TicketStatusResponse = serde_json::from_value(body).unwrap();

        assert!(response.ticket_desc.desc().is_none());
        assert_eq!(response.number_of_tickets_ahead, -1);
    }

    #[test]
    fn test_parse_optional_fields_missing() {
        let body = json!({ "queueName": "Main", "numberOfTicketsAhead": 0 });
        let response: TicketStatusResponse = serde_json::from_value(body).unwrap();

        assert!(response.queue_id.is_none());
        assert!(response.ticket_desc.desc().is_none());
    }

    #[test]
    fn test_parse_explicit_status() {
        let body = json!({
            "queueName": "Main",
            "numberOfTicketsAhead": 2,
            "status": "missed"
        });
        let response: TicketStatusResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.status, Some(ReportedStatus::Missed));
    }

    #[test]
    fn test_missing_queue_name_is_rejected() {
        let body = json!({ "queueId": "q-1", "numberOfTicketsAhead": 0 });
        let result: Result<TicketStatusResponse, _> = serde_json::from_value(body);
        assert!(result.is_err());
    }
}
