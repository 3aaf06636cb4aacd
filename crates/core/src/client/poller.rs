//! Interval polling of the ticket status.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::TicketStatusClient;

/// Calls `TicketStatusClient::refresh` every interval until stopped.
///
/// Each tick runs its poll in a separate task, so a slow request never
/// delays the next tick. The first tick fires one interval after `start`.
pub struct TicketPoller {
    client: Arc<TicketStatusClient>,
    interval: Duration,
    running: Arc<AtomicBool>,
    shutdown_tx: broadcast::Sender<()>,
}

impl TicketPoller {
    pub fn new(client: Arc<TicketStatusClient>, interval: Duration) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            client,
            interval,
            running: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
        }
    }

    /// Start polling in the background.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Ticket poller already running");
            return;
        }

        let client = Arc::clone(&self.client);
        let period = self.interval;
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        debug!("Ticket poller received shutdown");
                        break;
                    }
                    _ = ticker.tick() => {
                        let client = Arc::clone(&client);
                        tokio::spawn(async move {
                            client.refresh().await;
                        });
                    }
                }
            }
        });

        info!(interval_ms = period.as_millis() as u64, "Ticket poller started");
    }

    /// Stop polling. Polls already in flight still complete.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            warn!("Ticket poller not running");
            return;
        }

        let _ = self.shutdown_tx.send(());
        info!("Ticket poller stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

impl Drop for TicketPoller {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
    }
}
