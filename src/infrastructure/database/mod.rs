pub mod entities;
pub mod migrator;
pub mod repositories;
pub mod seed;

pub use repositories::SeaOrmRepositoryProvider;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::shared::{retry_with_backoff, RetryConfig};

const DEFAULT_DATABASE_URL: &str = "sqlite://./taxi_fare.db?mode=rwc";

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./taxi_fare.db?mode=rwc")
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Default::default()
        }
    }

    /// Each connection to `sqlite::memory:` opens its own database.
    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

/// Initialize database connection, retrying connection failures with backoff
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    info!("Connecting to database: {}", config.url);

    let mut opts = ConnectOptions::new(config.url.clone());
    if config.is_in_memory() {
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(config.max_connections.max(1));
    }
    opts.sqlx_logging(false);

    let db = retry_with_backoff(
        RetryConfig::default(),
        || Database::connect(opts.clone()),
        |e: &DbErr| matches!(e, DbErr::Conn(_) | DbErr::ConnectionAcquire(_)),
        "database_connect",
    )
    .await?;

    info!("Database connected successfully");
    Ok(db)
}
