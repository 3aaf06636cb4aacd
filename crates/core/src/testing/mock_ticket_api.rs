//! Mock ticket backend for testing.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::api::{ApiError, TicketApi, TicketStatusResponse};

/// A call made against the mock, for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    GetStatus { ticket_id: String, queue_id: String },
    Leave { ticket_id: String },
    Rejoin { ticket_id: String, queue_id: String },
}

/// A one-shot status result, optionally delayed.
#[derive(Debug)]
struct ScriptedStatus {
    result: Result<TicketStatusResponse, ApiError>,
    delay: Duration,
}

/// Mock implementation of the TicketApi trait.
///
/// Provides controllable behavior for testing:
/// - A standing status result returned by every poll
/// - Scripted one-shot results (with delays) that take precedence
/// - Failures for leave and rejoin, or a leave that never answers
/// - A record of every call made
pub struct MockTicketApi {
    /// Returned when no scripted result is queued.
    status: Arc<RwLock<Result<TicketStatusResponse, ApiError>>>,
    /// One-shot results, consumed in order.
    scripted: Arc<RwLock<VecDeque<ScriptedStatus>>>,
    leave_error: Arc<RwLock<Option<ApiError>>>,
    leave_hangs: Arc<RwLock<bool>>,
    rejoin_error: Arc<RwLock<Option<ApiError>>>,
    calls: Arc<RwLock<Vec<RecordedCall>>>,
}

impl Default for MockTicketApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTicketApi {
    /// Create a mock whose polls fail until a status is configured.
    pub fn new() -> Self {
        Self {
            status: Arc::new(RwLock::new(Err(ApiError::InvalidResponse(
                "no status configured".to_string(),
            )))),
            scripted: Arc::new(RwLock::new(VecDeque::new())),
            leave_error: Arc::new(RwLock::new(None)),
            leave_hangs: Arc::new(RwLock::new(false)),
            rejoin_error: Arc::new(RwLock::new(None)),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Set the response returned by every subsequent poll.
    pub async fn set_status(&self, response: TicketStatusResponse) {
        *self.status.write().await = Ok(response);
    }

    /// Make every subsequent poll fail.
    pub async fn set_status_error(&self, error: ApiError) {
        *self.status.write().await = Err(error);
    }

    /// Queue a one-shot poll result returned after `delay`.
    pub async fn push_scripted(
        &self,
        result: Result<TicketStatusResponse, ApiError>,
        delay: Duration,
    ) {
        self.scripted
            .write()
            .await
            .push_back(ScriptedStatus { result, delay });
    }

    /// Make every subsequent leave request fail.
    pub async fn set_leave_error(&self, error: ApiError) {
        *self.leave_error.write().await = Some(error);
    }

    /// Make every subsequent leave request hang forever.
    pub async fn set_leave_hangs(&self) {
        *self.leave_hangs.write().await = true;
    }

    /// Make every subsequent rejoin request fail.
    pub async fn set_rejoin_error(&self, error: ApiError) {
        *self.rejoin_error.write().await = Some(error);
    }

    /// Let rejoin requests succeed again.
    pub async fn clear_rejoin_error(&self) {
        *self.rejoin_error.write().await = None;
    }

    /// All calls made so far, in issue order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Number of status polls made so far.
    pub async fn status_call_count(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| matches!(c, RecordedCall::GetStatus { .. }))
            .count()
    }

    async fn record(&self, call: RecordedCall) {
        self.calls.write().await.push(call);
    }
}

#[async_trait]
impl TicketApi for MockTicketApi {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get_status(
        &self,
        ticket_id: &str,
        queue_id: &str,
    ) -> Result<TicketStatusResponse, ApiError> {
        self.record(RecordedCall::GetStatus {
            ticket_id: ticket_id.to_string(),
            queue_id: queue_id.to_string(),
        })
        .await;

        let scripted = self.scripted.write().await.pop_front();
        match scripted {
            Some(ScriptedStatus { result, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => self.status.read().await.clone(),
        }
    }

    async fn leave(&self, ticket_id: &str) -> Result<(), ApiError> {
        self.record(RecordedCall::Leave {
            ticket_id: ticket_id.to_string(),
        })
        .await;

        if *self.leave_hangs.read().await {
            std::future::pending::<()>().await;
        }

        match self.leave_error.read().await.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn rejoin(&self, ticket_id: &str, queue_id: &str) -> Result<(), ApiError> {
        self.record(RecordedCall::Rejoin {
            ticket_id: ticket_id.to_string(),
            queue_id: queue_id.to_string(),
        })
        .await;

        match self.rejoin_error.read().await.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
