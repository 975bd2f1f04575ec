// # dyndnsd - IONOS dynamic DNS daemon
//
// The dyndnsd daemon is a thin integration layer. It is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Starting the liveness endpoint
// 4. Wiring the IONOS provider into the update scheduler and running it
//
// All scheduling logic lives in dyndns-core; the HTTP call lives in
// dyndns-provider-ionos.
//
// ## Example
//
// ```bash
// export IONOS_API_KEY=prefix.secret
// export IONOS_DOMAINS=example.com,www.example.com
// export UPDATE_INTERVAL_SECONDS=300
// export LOG_LEVEL=debug
//
// dyndnsd
// ```
//
// See `env_config` for the full list of variables.

mod env_config;
mod health;

use anyhow::Result;
use dyndns_core::{DyndnsConfig, UpdateScheduler};
use dyndns_provider_ionos::IonosProvider;
use std::env;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DyndnsExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DyndnsExitCode> for ExitCode {
    fn from(code: DyndnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let lookup = |key: &str| env::var(key).ok();

    // Initialize tracing
    let log_level = env_config::log_level(lookup);
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DyndnsExitCode::ConfigError.into();
    }

    info!(log_level = %log_level, "IONOS DynDNS starting");

    // Load configuration from environment
    let config = match env_config::load(lookup) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{:#}", e);
            return DyndnsExitCode::ConfigError.into();
        }
    };

    info!(
        domains = ?config.domains,
        update_interval_seconds = config.update_interval_secs,
        heartbeat_interval_seconds = config.heartbeat_interval_secs,
        health_port = config.health_port,
        "Configuration loaded"
    );

    let scheduler = match build_scheduler(&config) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            error!("Startup error: {:#}", e);
            return DyndnsExitCode::ConfigError.into();
        }
    };

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DyndnsExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        match run_daemon(scheduler, config.health_port).await {
            Ok(signal) => {
                info!("Received shutdown signal: {}", signal);
                DyndnsExitCode::CleanShutdown
            }
            Err(e) => {
                error!("Daemon error: {}", e);
                DyndnsExitCode::RuntimeError
            }
        }
    });

    result.into()
}

/// Build the IONOS provider and the scheduler that drives it
fn build_scheduler(config: &DyndnsConfig) -> Result<UpdateScheduler> {
    let provider = IonosProvider::from_settings(config.api_key.clone(), &config.provider)?;
    info!(endpoint = provider.endpoint(), "Using IONOS provider");

    // The daemon has no event consumer; logs carry the same information
    let (scheduler, _) = UpdateScheduler::new(Box::new(provider), config)?;

    Ok(scheduler)
}

/// Run the liveness endpoint and the scheduler until a shutdown signal arrives
async fn run_daemon(scheduler: UpdateScheduler, health_port: u16) -> Result<&'static str> {
    health::spawn(health_port);

    tokio::select! {
        never = scheduler.run() => match never {},
        signal = wait_for_shutdown() => signal,
    }
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// # Returns
///
/// Returns the name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    let signal = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };

    Ok(signal)
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}
