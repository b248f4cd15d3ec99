//! Server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full service lifecycle:
//! metrics recorder, database init and migrations, repositories, REST API
//! and graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::application::{FareService, PricingService, UsageService, VehicleService};
use crate::config::{AppConfig, LogFormat, LoggingConfig};
use crate::domain::{FareCalculator, RepositoryProvider};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, InMemoryRepositoryProvider, SeaOrmRepositoryProvider};
use crate::interfaces::http::modules::health::HealthState;
use crate::interfaces::http::modules::metrics::{describe_metrics, MetricsState};
use crate::interfaces::http::{create_api_router, ApiServices};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the fare service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Serve from seeded in-memory repositories instead of the database.
    pub in_memory: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            in_memory: false,
        }
    }
}

// ── Tracing ────────────────────────────────────────────────────────

/// Install the global `tracing` subscriber. `RUST_LOG` takes precedence
/// over the configured level. Records from the `log` facade are bridged.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match logging.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(e) = result {
        eprintln!("tracing subscriber already installed: {}", e);
    }
}

/// The global recorder can only be installed once per process; later
/// starts reuse its handle.
fn prometheus_handle() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    static PROM_HANDLE: Mutex<Option<PrometheusHandle>> = Mutex::new(None);

    let mut slot = PROM_HANDLE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(handle) = slot.as_ref() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    info!("📊 Prometheus metrics recorder installed");
    *slot = Some(handle.clone());
    Ok(handle)
}

/// Wire application services over `repos` as configured.
pub fn build_services(repos: Arc<dyn RepositoryProvider>, config: &AppConfig) -> ApiServices {
    let calculator = FareCalculator::new(config.pricing.max_distance_km);
    ApiServices {
        fares: Arc::new(FareService::new(
            repos.clone(),
            calculator,
            config.pricing.currency.clone(),
        )),
        pricing: Arc::new(PricingService::new(repos.clone())),
        vehicles: Arc::new(VehicleService::new(repos.clone())),
        usage: Arc::new(UsageService::new(repos)),
        default_vehicle_type: config.pricing.default_vehicle_type.clone(),
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running fare service.
///
/// ```rust,no_run
/// use taxi_fare::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub local_addr: SocketAddr,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder
    /// 2. Connect to the database and run migrations (unless in-memory)
    /// 3. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting taxi fare service...");

        let prometheus = prometheus_handle()?;

        // ── Storage ────────────────────────────────────────────
        let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
            if opts.in_memory {
                info!("Using seeded in-memory storage, nothing is persisted");
                (Arc::new(InMemoryRepositoryProvider::seeded()), None)
            } else {
                let db = init_database(&app_cfg.database_config()).await?;

                if opts.auto_migrate {
                    info!("Running database migrations...");
                    Migrator::up(&db, None).await?;
                    info!("Migrations completed");
                }

                (Arc::new(SeaOrmRepositoryProvider::new(db.clone())), Some(db))
            };

        // ── Services ───────────────────────────────────────────
        let services = build_services(repos.clone(), &app_cfg);

        match services.vehicles.list(false).await {
            Ok(vehicles)
                if !vehicles
                    .iter()
                    .any(|v| v.name == app_cfg.pricing.default_vehicle_type) =>
            {
                warn!(
                    vehicle_type = %app_cfg.pricing.default_vehicle_type,
                    "Default vehicle type is not an active vehicle type"
                );
            }
            Ok(_) => {}
            Err(e) => warn!("Could not list vehicle types: {}", e),
        }

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let health = HealthState {
            db: db.clone(),
            started_at: Arc::new(Instant::now()),
        };
        let api_router = create_api_router(
            services,
            health,
            MetricsState { handle: prometheus },
        );

        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(
            listener,
            api_router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Taxi fare service started");

        Ok(Self {
            repos,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop, then close the database.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds once
    /// shutdown is triggered.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        // Runs until a shutdown signal arrives or the server fails
        let signal = shutdown.signal();
        let mut api_task = api_task;
        tokio::select! {
            _ = signal.wait() => {}
            result = &mut api_task => {
                if let Err(e) = result {
                    error!("REST API server task panicked: {}", e);
                }
            }
        }

        if !api_task.is_finished() {
            let drained = shutdown
                .run_cleanup(|| async move {
                    if let Err(e) = api_task.await {
                        error!("REST API server task panicked: {}", e);
                    }
                })
                .await;
            if !drained {
                warn!("In-flight requests were cut off");
            }
        }
        info!("REST API server stopped");

        if let Some(db) = db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("✅ Database connection closed");
            }
        }

        info!("👋 Taxi fare service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down taxi fare service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}
