//! Interactive session loop: renders the ticket page and handles commands.

use std::io::{IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use queuewatch_core::{TicketPage, TicketSnapshot, TicketStatusClient, UserAction};

use crate::commands::{is_confirmation, Command, HELP};
use crate::navigator::LandingNavigator;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// How long to let the removal request finish after leaving.
const LEAVE_GRACE: Duration = Duration::from_secs(5);

/// Why the session loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    LeftQueue,
    Quit,
    Signal,
}

pub struct Console {
    client: Arc<TicketStatusClient>,
    navigator: Arc<LandingNavigator>,
    wait_time_per_ticket_mins: u32,
    clear_screen: bool,
    confirming_leave: bool,
    pending_leave: Option<JoinHandle<()>>,
}

impl Console {
    pub fn new(
        client: Arc<TicketStatusClient>,
        navigator: Arc<LandingNavigator>,
        wait_time_per_ticket_mins: u32,
    ) -> Self {
        Self {
            client,
            navigator,
            wait_time_per_ticket_mins,
            clear_screen: std::io::stdout().is_terminal(),
            confirming_leave: false,
            pending_leave: None,
        }
    }

    /// Run until the user leaves, quits, or the process is signalled.
    ///
    /// Closing stdin does not end the session; the page keeps refreshing.
    pub async fn run(mut self) -> Result<SessionEnd> {
        let mut updates = self.client.subscribe();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdin_open = true;

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        let navigator = Arc::clone(&self.navigator);
        let left = navigator.left();
        tokio::pin!(left);

        self.render(&self.client.snapshot().await)?;

        loop {
            tokio::select! {
                _ = &mut left => {
                    if let Some(removal) = self.pending_leave.take() {
                        tokio::select! {
                            _ = &mut shutdown => info!("Received shutdown signal"),
                            finished = tokio::time::timeout(LEAVE_GRACE, removal) => {
                                if finished.is_err() {
                                    warn!("Leave request still pending, not waiting for it");
                                }
                            }
                        }
                    }
                    return Ok(SessionEnd::LeftQueue);
                }
                _ = &mut shutdown => {
                    info!("Received shutdown signal");
                    return Ok(SessionEnd::Signal);
                }
                changed = updates.changed() => {
                    if changed.is_err() {
                        warn!("Ticket updates closed");
                        return Ok(SessionEnd::Quit);
                    }
                    let snapshot = updates.borrow_and_update().clone();
                    if !self.confirming_leave {
                        self.render(&snapshot)?;
                    }
                }
                line = lines.next_line(), if stdin_open => {
                    match line.context("Failed to read from stdin")? {
                        Some(line) => {
                            if let Some(end) = self.handle_line(&line).await? {
                                return Ok(end);
                            }
                        }
                        None => {
                            debug!("stdin closed, continuing without commands");
                            stdin_open = false;
                        }
                    }
                }
            }
        }
    }

    async fn handle_line(&mut self, line: &str) -> Result<Option<SessionEnd>> {
        if self.confirming_leave {
            self.confirming_leave = false;
            if is_confirmation(line) {
                // navigation is observed by the select loop
                self.pending_leave = self.client.leave_queue().await;
            } else {
                self.client.set_refresh_enabled(true);
                self.render(&self.client.snapshot().await)?;
            }
            return Ok(None);
        }

        let view = self.client.snapshot().await.view;
        match Command::parse(line) {
            Command::Leave if view.allows(UserAction::Leave) => {
                self.client.set_refresh_enabled(false);
                self.confirming_leave = true;
                print!("Leave the queue? You will lose your place. [y/N] ");
                std::io::stdout().flush()?;
            }
            Command::Rejoin if view.allows(UserAction::Rejoin) => {
                if let Err(e) = self.client.rejoin_queue().await {
                    println!("Could not rejoin the queue: {}", e);
                }
            }
            Command::Leave | Command::Rejoin => {
                println!("That action is not available right now.");
            }
            Command::Refresh => {
                if self.client.refresh().await.is_none() {
                    println!("Nothing to refresh yet.");
                }
            }
            Command::Quit => return Ok(Some(SessionEnd::Quit)),
            Command::Help => println!("{}", HELP),
            Command::Empty => {}
            Command::Unknown(word) => {
                println!("Unknown command: {}", word);
                println!("{}", HELP);
            }
        }
        Ok(None)
    }

    fn render(&self, snapshot: &TicketSnapshot) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        if self.clear_screen {
            write!(stdout, "{}", CLEAR_SCREEN)?;
        } else {
            writeln!(stdout)?;
        }
        writeln!(
            stdout,
            "{}",
            TicketPage::new(snapshot, self.wait_time_per_ticket_mins)
        )?;
        stdout.flush()?;
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
