//! Launch parameters.
//!
//! The queue page is opened with `?ticket=<id>&queue=<id>&ticketNumber=<n>`.
//! All three must be present for the page to have a ticket context.

use reqwest::Url;
use thiserror::Error;

use crate::session::SessionIdentifiers;

/// Placeholder origin used to parse bare query strings.
const QUERY_ONLY_BASE: &str = "http://launch.invalid/";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Invalid launch URL: {0}")]
    InvalidUrl(String),
}

/// Identifiers the page was opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchParams {
    pub ticket: String,
    pub queue: String,
    pub ticket_number: String,
}

impl LaunchParams {
    /// Parse launch parameters from a full URL (`https://host/ticket?...`)
    /// or a bare query string (`?ticket=...` or `ticket=...`).
    ///
    /// Returns `Ok(None)` when any of the three parameters is missing or empty.
    pub fn parse(input: &str) -> Result<Option<Self>, LaunchError> {
        let input = input.trim();
        let url = if input.contains("://") {
            Url::parse(input)
        } else {
            Url::parse(&format!(
                "{}?{}",
                QUERY_ONLY_BASE,
                input.trim_start_matches('?')
            ))
        }
        .map_err(|e| LaunchError::InvalidUrl(format!("{}: {}", input, e)))?;

        let mut ticket = None;
        let mut queue = None;
        let mut ticket_number = None;
        for (key, value) in url.query_pairs() {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "ticket" => ticket = Some(value.into_owned()),
                "queue" => queue = Some(value.into_owned()),
                "ticketNumber" => ticket_number = Some(value.into_owned()),
                _ => {}
            }
        }

        Ok(match (ticket, queue, ticket_number) {
            (Some(ticket), Some(queue), Some(ticket_number)) => Some(Self {
                ticket,
                queue,
                ticket_number,
            }),
            _ => None,
        })
    }

    /// Identifiers to persist in the `ticket` cookie.
    pub fn to_identifiers(&self) -> SessionIdentifiers {
        SessionIdentifiers {
            queue: self.queue.clone(),
            ticket: self.ticket.clone(),
            ticket_number: self.ticket_number.clone(),
        }
    }
}

impl From<SessionIdentifiers> for LaunchParams {
    fn from(ids: SessionIdentifiers) -> Self {
        Self {
            ticket: ids.ticket,
            queue: ids.queue,
            ticket_number: ids.ticket_number,
        }
    }
}
