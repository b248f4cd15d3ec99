//! # Taxi Fare Service
//!
//! Tiered taxi fare calculation with pricing administration, calculation
//! history and usage metrics over REST.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Fare calculator, pricing tiers, vehicle types, calculation
//!   records, usage aggregation and repository traits
//! - **application**: Services orchestrating repositories and the calculator
//! - **infrastructure**: SeaORM database, migrations and in-memory storage
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Runtime lifecycle (tracing, metrics, graceful shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiServices};
