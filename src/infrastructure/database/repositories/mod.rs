//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod fare_calculation_repository;
pub mod pricing_tier_repository;
pub mod repository_provider;
pub mod vehicle_type_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::{DomainError, DomainResult};
use crate::shared::errors::InfraError;

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    InfraError::Database(e).into()
}

pub(crate) fn to_cents(amount: Decimal) -> DomainResult<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.round().to_i64())
        .ok_or_else(|| DomainError::Validation(format!("amount {} is out of range", amount)))
}

pub(crate) fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

pub(crate) fn to_meters(km: Decimal) -> DomainResult<i64> {
    km.checked_mul(Decimal::ONE_THOUSAND)
        .and_then(|meters| meters.round().to_i64())
        .ok_or_else(|| DomainError::Validation(format!("distance {} is out of range", km)))
}

pub(crate) fn from_meters(meters: i64) -> Decimal {
    Decimal::new(meters, 3)
}

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};
    use sea_orm_migration::MigratorTrait;

    use crate::infrastructure::database::migrator::Migrator;

    /// Fresh in-memory SQLite database with all migrations applied.
    pub async fn migrated_db() -> DatabaseConnection {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }
}
