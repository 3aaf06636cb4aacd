use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the cookie holding the ticket identifiers.
pub const TICKET_COOKIE: &str = "ticket";

/// Errors from the session store.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Identifiers needed to resume tracking a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentifiers {
    pub queue: String,
    pub ticket: String,
    pub ticket_number: String,
}

/// Storage for the `ticket` cookie.
pub trait SessionStore: Send + Sync {
    /// Read the persisted identifiers, if any.
    fn load(&self) -> Result<Option<SessionIdentifiers>, SessionError>;

    /// Persist identifiers, replacing any previous value.
    fn save(&self, identifiers: &SessionIdentifiers) -> Result<(), SessionError>;

    /// Remove the persisted identifiers. Removing an absent value is not an error.
    fn clear(&self) -> Result<(), SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cookie_value_shape() {
        let ids = SessionIdentifiers {
            queue: "q-1".to_string(),
            ticket: "t-1".to_string(),
            ticket_number: "42".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&ids).unwrap(),
            json!({ "queue": "q-1", "ticket": "t-1", "ticketNumber": "42" })
        );
    }
}
