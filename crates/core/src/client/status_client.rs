//! The ticket status state machine.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::TicketApi;
use crate::launch::LaunchParams;
use crate::session::SessionStore;
use crate::status::{derive_status, TicketStatus, TicketView};

use super::types::{ClientError, MountOutcome, Navigator, TicketSnapshot};

/// Derived state plus the sequence number of the poll that produced it.
#[derive(Debug, Default)]
struct PollState {
    snapshot: TicketSnapshot,
    applied_seq: u64,
}

/// Tracks one ticket: polls its status, derives the view, and carries out
/// the leave and rejoin actions.
///
/// Polls may overlap. Every poll takes a sequence number before it is
/// issued and its response is applied only if no later poll has already
/// been applied, so a slow response can never roll the view back.
pub struct TicketStatusClient {
    api: Arc<dyn TicketApi>,
    sessions: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    /// Context the page was opened with; rejoin always uses this queue.
    launch: RwLock<Option<LaunchParams>>,
    state: RwLock<PollState>,
    issued_seq: AtomicU64,
    refresh_enabled: AtomicBool,
    updates: watch::Sender<TicketSnapshot>,
}

impl TicketStatusClient {
    /// Create a client in the loading state.
    pub fn new(
        api: Arc<dyn TicketApi>,
        sessions: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        launch: Option<LaunchParams>,
    ) -> Self {
        let (updates, _) = watch::channel(TicketSnapshot::default());

        Self {
            api,
            sessions,
            navigator,
            launch: RwLock::new(launch),
            state: RwLock::new(PollState::default()),
            issued_seq: AtomicU64::new(0),
            refresh_enabled: AtomicBool::new(true),
            updates,
        }
    }

    /// Establish the ticket context and issue the first poll.
    ///
    /// Launch parameters are persisted to the `ticket` cookie. Without them
    /// the persisted cookie is used instead.
    pub async fn mount(&self) -> MountOutcome {
        let launch = self.launch.read().await.clone();

        let (params, outcome) = match launch {
            Some(params) => {
                self.persist_session(&params);
                (params, MountOutcome::Launched)
            }
            None => match self.sessions.load() {
                Ok(Some(ids)) => {
                    let params = LaunchParams::from(ids);
                    *self.launch.write().await = Some(params.clone());
                    (params, MountOutcome::Resumed)
                }
                Ok(None) => {
                    warn!("No launch parameters and no saved ticket");
                    return MountOutcome::NoTicketContext;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read saved ticket");
                    return MountOutcome::NoTicketContext;
                }
            },
        };

        info!(
            ticket_id = %params.ticket,
            queue_id = %params.queue,
            ticket_number = %params.ticket_number,
            ?outcome,
            "Tracking ticket"
        );

        {
            let mut state = self.state.write().await;
            state.snapshot.ticket_number = Some(params.ticket_number.clone());
            self.updates.send_replace(state.snapshot.clone());
        }

        self.fetch_status(&params.ticket, &params.queue).await;
        outcome
    }

    /// Poll the backend once and apply the result.
    ///
    /// On failure the cookie is cleared and the status becomes `Error`.
    /// Returns the snapshot current after this poll was handled, which is the
    /// newer state if this response arrived stale.
    pub async fn fetch_status(&self, ticket_id: &str, queue_id: &str) -> TicketSnapshot {
        let seq = self.issued_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.api.get_status(ticket_id, queue_id).await;

        let mut state = self.state.write().await;
        if seq < state.applied_seq {
            debug!(seq, applied_seq = state.applied_seq, "Discarding stale ticket status");
            return state.snapshot.clone();
        }
        state.applied_seq = seq;

        let previous_view = state.snapshot.view;
        let snapshot = &mut state.snapshot;

        let clear_cookie = match result {
            Ok(response) => {
                snapshot.ticket_id = Some(ticket_id.to_string());
                snapshot.queue_id = Some(
                    response
                        .queue_id
                        .clone()
                        .filter(|q| !q.is_empty())
                        .unwrap_or_else(|| queue_id.to_string()),
                );
                if let Some(desc) = response.ticket_desc.desc() {
                    snapshot.display_info = Some(desc.label());
                }
                snapshot.tickets_ahead = Some(response.number_of_tickets_ahead);
                snapshot.last_updated = Some(Utc::now());
                snapshot.status = derive_status(&response);

                snapshot.status == TicketStatus::Served
            }
            Err(e) => {
                warn!(ticket_id, queue_id, error = %e, "Ticket status poll failed");
                snapshot.status = TicketStatus::Error;
                snapshot.tickets_ahead = None;
                true
            }
        };

        snapshot.view = TicketView::resolve(snapshot.status, snapshot.tickets_ahead);
        if snapshot.view != previous_view {
            info!(
                ticket_id,
                status = snapshot.status.as_str(),
                view = snapshot.view.as_str(),
                "Ticket view changed"
            );
        }

        let snapshot = snapshot.clone();
        self.updates.send_replace(snapshot.clone());
        drop(state);

        // The store may touch the filesystem; keep that off the state lock
        if clear_cookie {
            self.clear_session();
        }
        snapshot
    }

    /// One interval tick: poll the current ticket and queue.
    ///
    /// Does nothing while refresh is disabled or before the first successful
    /// poll has confirmed the identifiers.
    pub async fn refresh(&self) -> Option<TicketSnapshot> {
        if !self.refresh_enabled() {
            debug!("Refresh disabled, skipping poll");
            return None;
        }

        let ids = {
            let state = self.state.read().await;
            state
                .snapshot
                .ticket_id
                .clone()
                .zip(state.snapshot.queue_id.clone())
        };

        match ids {
            Some((ticket_id, queue_id)) => Some(self.fetch_status(&ticket_id, &queue_id).await),
            None => {
                debug!("Ticket not confirmed yet, skipping poll");
                None
            }
        }
    }

    /// Leave the queue.
    ///
    /// The cookie is cleared and the user is sent to the landing page first.
    /// The removal request then runs in the background and its outcome is only
    /// logged; the returned handle lets callers wait for it. `None` when no
    /// ticket is known.
    pub async fn leave_queue(&self) -> Option<JoinHandle<()>> {
        let ticket_id = self.current_ticket_id().await;

        self.clear_session();
        self.navigator.navigate_to_landing();

        let Some(ticket_id) = ticket_id else {
            warn!("No ticket to remove from the queue");
            return None;
        };

        let api = Arc::clone(&self.api);
        Some(tokio::spawn(async move {
            match api.leave(&ticket_id).await {
                Ok(()) => info!(ticket_id = %ticket_id, "Left the queue"),
                Err(e) => warn!(ticket_id = %ticket_id, error = %e, "Failed to leave the queue"),
            }
        }))
    }

    /// Put the ticket back into the queue it was launched with.
    ///
    /// On success the cookie is saved again and the launch ticket/queue pair
    /// is polled. On failure the state is left as it was.
    pub async fn rejoin_queue(&self) -> Result<TicketSnapshot, ClientError> {
        let launch = self
            .launch
            .read()
            .await
            .clone()
            .ok_or(ClientError::MissingLaunchContext)?;
        let ticket_id = self
            .current_ticket_id()
            .await
            .unwrap_or_else(|| launch.ticket.clone());

        if let Err(e) = self.api.rejoin(&ticket_id, &launch.queue).await {
            warn!(ticket_id = %ticket_id, queue_id = %launch.queue, error = %e, "Failed to rejoin the queue");
            return Err(e.into());
        }
        info!(ticket_id = %ticket_id, queue_id = %launch.queue, "Rejoined the queue");

        self.persist_session(&launch);
        Ok(self.fetch_status(&launch.ticket, &launch.queue).await)
    }

    /// Enable or pause interval polling.
    pub fn set_refresh_enabled(&self, enabled: bool) {
        let was = self.refresh_enabled.swap(enabled, Ordering::SeqCst);
        if was != enabled {
            debug!(enabled, "Refresh toggled");
        }
    }

    pub fn refresh_enabled(&self) -> bool {
        self.refresh_enabled.load(Ordering::SeqCst)
    }

    /// Current snapshot.
    pub async fn snapshot(&self) -> TicketSnapshot {
        self.state.read().await.snapshot.clone()
    }

    /// Receive a snapshot every time a poll is applied.
    pub fn subscribe(&self) -> watch::Receiver<TicketSnapshot> {
        self.updates.subscribe()
    }

    async fn current_ticket_id(&self) -> Option<String> {
        let confirmed = self.state.read().await.snapshot.ticket_id.clone();
        match confirmed {
            Some(id) => Some(id),
            None => self.launch.read().await.as_ref().map(|l| l.ticket.clone()),
        }
    }

    fn persist_session(&self, params: &LaunchParams) {
        if let Err(e) = self.sessions.save(&params.to_identifiers()) {
            warn!(error = %e, "Failed to save ticket cookie");
        }
    }

    fn clear_session(&self) {
        if let Err(e) = self.sessions.clear() {
            warn!(error = %e, "Failed to remove ticket cookie");
        }
    }
}
