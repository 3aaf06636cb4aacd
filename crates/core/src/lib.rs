pub mod api;
pub mod client;
pub mod config;
pub mod launch;
pub mod render;
pub mod session;
pub mod status;
pub mod testing;

pub use api::{
    ApiError, HttpTicketApi, ReportedStatus, TicketApi, TicketDesc, TicketDescField,
    TicketStatusResponse,
};
pub use client::{
    ClientError, MountOutcome, Navigator, TicketPoller, TicketSnapshot, TicketStatusClient,
};
pub use config::{
    load_config, load_config_from_str, validate_config, BackendConfig, Config, ConfigError,
    SessionConfig, TicketConfig,
};
pub use launch::{LaunchError, LaunchParams};
pub use render::{format_last_updated, TicketPage};
pub use session::{
    FileSessionStore, MemorySessionStore, SessionError, SessionIdentifiers, SessionStore,
    TICKET_COOKIE,
};
pub use status::{derive_status, TicketStatus, TicketView, UserAction};
