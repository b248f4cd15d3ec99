//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_vehicle_types;
mod m20250101_000002_create_pricing_tiers;
mod m20250101_000003_create_fare_calculations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_vehicle_types::Migration),
            Box::new(m20250101_000002_create_pricing_tiers::Migration),
            Box::new(m20250101_000003_create_fare_calculations::Migration),
        ]
    }
}
