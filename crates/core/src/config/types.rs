use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub backend: BackendConfig,
    #[serde(default)]
    pub ticket: TicketConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Ticket status backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Ticket endpoint, e.g. "https://queue.example.org/.netlify/functions/ticket".
    /// Status, leave and rejoin requests all go to this URL.
    pub base_url: String,
    /// Request timeout in seconds. Unset means requests may wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Polling and wait-time presentation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TicketConfig {
    /// Minutes each ticket ahead adds to the estimated wait.
    #[serde(default = "default_wait_time")]
    pub wait_time_per_ticket_mins: u32,
    /// How often the ticket status is polled (milliseconds).
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_ms: u64,
}

impl TicketConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            wait_time_per_ticket_mins: default_wait_time(),
            refresh_interval_ms: default_refresh_interval(),
        }
    }
}

fn default_wait_time() -> u32 {
    3
}

fn default_refresh_interval() -> u64 {
    5000
}

/// Local session persistence
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Cookie jar file holding the persisted ticket identifiers.
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
    /// Where the user is sent after leaving the queue.
    #[serde(default = "default_landing_url")]
    pub landing_url: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
            landing_url: default_landing_url(),
        }
    }
}

fn default_session_path() -> PathBuf {
    PathBuf::from("queuewatch-session.json")
}

fn default_landing_url() -> String {
    "/".to_string()
}
