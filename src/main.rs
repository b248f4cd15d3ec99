//! Taxi fare service
//!
//! REST API for tiered taxi fare calculation.
//! Reads configuration from TOML file (~/.config/taxi-fare/config.toml).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use taxi_fare::config::{config_path_from_env, AppConfig};
use taxi_fare::server::{init_tracing, ServerHandle, ServerOptions};

#[derive(Debug, Parser)]
#[command(name = "taxi-fare-service", version, about = "Taxi fare calculator REST service")]
struct Cli {
    /// Config file (default: $TAXI_FARE_CONFIG or ~/.config/taxi-fare/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.port`
    #[arg(short, long)]
    port: Option<u16>,

    /// Override `logging.level`
    #[arg(long)]
    log_level: Option<String>,

    /// Override `database.url`
    #[arg(long)]
    database_url: Option<String>,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup
    #[arg(long)]
    no_migrate: bool,

    /// Serve from seeded in-memory storage (nothing is persisted)
    #[arg(long)]
    in_memory: bool,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(ref url) = self.database_url {
            config.database.url = url.clone();
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(config_path_from_env);
    let mut app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load config {}: {}", config_path.display(), e);
            return ExitCode::FAILURE;
        }
    };
    cli.apply(&mut app_cfg);

    if let Err(e) = app_cfg.validate() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    if cli.check {
        println!("Configuration OK ({})", config_path.display());
        return ExitCode::SUCCESS;
    }

    init_tracing(&app_cfg.logging);
    info!("Configuration loaded from {}", config_path.display());

    let opts = ServerOptions {
        config: app_cfg,
        auto_migrate: !cli.no_migrate,
        in_memory: cli.in_memory,
    };

    let handle = match ServerHandle::start(opts).await {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Start listening for shutdown signals (SIGTERM, SIGINT)
    handle.install_signal_handler();
    handle.wait().await;

    ExitCode::SUCCESS
}
