//! reqwest implementation of the ticket backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use crate::config::BackendConfig;

use super::{ApiError, TicketApi, TicketStatusResponse};

/// Ticket backend reached over HTTP.
///
/// All three operations hit the same endpoint and differ by method:
/// `GET ?id=&queue=` for status, `DELETE ?id=` to leave and
/// `PUT ?id=&queue=` to rejoin.
pub struct HttpTicketApi {
    client: Client,
    base_url: String,
}

impl HttpTicketApi {
    /// Create a new client for the configured endpoint.
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn ticket_url(&self, ticket_id: &str, queue_id: Option<&str>) -> String {
        let mut url = format!("{}?id={}", self.base_url, urlencoding::encode(ticket_id));
        if let Some(queue_id) = queue_id {
            url.push_str(&format!("&queue={}", urlencoding::encode(queue_id)));
        }
        url
    }
}

fn map_send_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_connect() {
        ApiError::ConnectionFailed(e.to_string())
    } else {
        ApiError::Request(e.to_string())
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Http {
        status: status.as_u16(),
        body: body.chars().take(200).collect(),
    })
}

#[async_trait]
impl TicketApi for HttpTicketApi {
    fn name(&self) -> &str {
        "http"
    }

    async fn get_status(
        &self,
        ticket_id: &str,
        queue_id: &str,
    ) -> Result<TicketStatusResponse, ApiError> {
        let url = self.ticket_url(ticket_id, Some(queue_id));
        debug!(ticket_id, queue_id, "Fetching ticket status");

        let response = self.client.get(&url).send().await.map_err(map_send_error)?;
        let response = ensure_success(response).await?;

        response
            .json::<TicketStatusResponse>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    async fn leave(&self, ticket_id: &str) -> Result<(), ApiError> {
        let url = self.ticket_url(ticket_id, None);
        debug!(ticket_id, "Removing ticket from queue");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(map_send_error)?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn rejoin(&self, ticket_id: &str, queue_id: &str) -> Result<(), ApiError> {
        let url = self.ticket_url(ticket_id, Some(queue_id));
        debug!(ticket_id, queue_id, "Rejoining queue");

        let response = self.client.put(&url).send().await.map_err(map_send_error)?;
        ensure_success(response).await?;
        Ok(())
    }
}
