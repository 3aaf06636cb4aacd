//! queuewatch: follow a ticket through a virtual queue from the terminal.

mod commands;
mod console;
mod navigator;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use queuewatch_core::{
    load_config, validate_config, FileSessionStore, HttpTicketApi, LaunchParams, MountOutcome,
    Navigator, SessionStore, TicketApi, TicketPoller, TicketStatusClient,
};

use console::{Console, SessionEnd};
use navigator::LandingNavigator;

/// Follow your ticket in a virtual queue
#[derive(Parser)]
#[command(name = "queuewatch")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Launch URL or query string carrying ticket, queue and ticketNumber.
    /// Without it, the ticket saved by the previous run is resumed.
    launch: Option<String>,

    /// Configuration file
    #[arg(short, long, env = "QUEUEWATCH_CONFIG", default_value = "queuewatch.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            1
        }
    };
    // stdin is read on a blocking thread that may still be parked in read()
    std::process::exit(code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the ticket page
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Loading configuration from {:?}", cli.config);
    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    validate_config(&config).context("Configuration validation failed")?;

    info!("Session file: {:?}", config.session.path);

    let launch = match cli.launch.as_deref() {
        Some(input) => {
            let params = LaunchParams::parse(input).context("Failed to read launch parameters")?;
            if params.is_none() {
                info!("Launch parameters incomplete, falling back to saved ticket");
            }
            params
        }
        None => None,
    };

    let api: Arc<dyn TicketApi> =
        Arc::new(HttpTicketApi::new(&config.backend).context("Failed to create ticket API")?);
    info!("Ticket endpoint: {} ({})", config.backend.base_url, api.name());
    let sessions: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&config.session.path));
    let navigator = Arc::new(LandingNavigator::new(config.session.landing_url.clone()));

    let client = Arc::new(TicketStatusClient::new(
        api,
        sessions,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        launch,
    ));

    if client.mount().await == MountOutcome::NoTicketContext {
        bail!("No ticket to follow: pass a launch URL with ticket, queue and ticketNumber");
    }

    let poller = TicketPoller::new(Arc::clone(&client), config.ticket.refresh_interval());
    poller.start();

    let console = Console::new(
        Arc::clone(&client),
        navigator,
        config.ticket.wait_time_per_ticket_mins,
    );
    let end = console.run().await;

    poller.stop();

    match end? {
        SessionEnd::LeftQueue => info!("Left the queue"),
        SessionEnd::Quit => info!("Stopped watching"),
        SessionEnd::Signal => info!("Shutting down"),
    }

    Ok(())
}
