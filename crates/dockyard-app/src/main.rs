mod cli;
mod daemon;
mod input;

use std::path::Path;
use std::process::ExitCode;

use dockyard_config::{toml_loader, validation, DockyardConfig};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use crate::daemon::Daemon;

/// Load the config, falling back to defaults. The load error is handed
/// back so it can be logged once logging is up.
fn load_config(path: Option<&str>) -> (DockyardConfig, Option<String>) {
    let loaded = match path {
        Some(path) => toml_loader::load_from_path(Path::new(path))
            .and_then(|config| validation::validate(&config).map(|()| config)),
        None => dockyard_config::load_config(),
    };
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (DockyardConfig::default(), Some(e.to_string())),
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("dockyard={level}")))
        .unwrap_or_else(|_| EnvFilter::new("dockyard=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();
    let (config, config_error) = load_config(args.config.as_deref());

    let level = args
        .log_level
        .as_deref()
        .unwrap_or(config.logging.level.as_directive());
    init_logging(level);

    if let Some(path) = &args.config {
        tracing::info!("Using config override: {path}");
    }
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    tracing::info!("Dockyard v{} starting...", env!("CARGO_PKG_VERSION"));

    let daemon = match Daemon::spawn(&config, args.standalone) {
        Ok(daemon) => daemon,
        Err(e) => {
            tracing::error!("Failed to start: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = daemon.start().await {
        tracing::warn!("Startup handshake incomplete: {e}");
    }

    let stdin = BufReader::new(tokio::io::stdin());
    tokio::select! {
        result = daemon.pump(stdin) => {
            if let Err(e) = result {
                tracing::error!("Event input failed: {e}");
            }
        }
        _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted"),
    }

    match daemon.shutdown().await {
        Ok(service) => {
            tracing::info!(
                apps = service.registry().len(),
                "Shutdown complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Shutdown failed: {e}");
            ExitCode::FAILURE
        }
    }
}
