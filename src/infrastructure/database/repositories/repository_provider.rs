//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::calculation::FareCalculationRepository;
use crate::domain::fare::PricingTierRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::vehicle::VehicleTypeRepository;

use super::fare_calculation_repository::SeaOrmFareCalculationRepository;
use super::pricing_tier_repository::SeaOrmPricingTierRepository;
use super::vehicle_type_repository::SeaOrmVehicleTypeRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let tiers = repos.pricing_tiers().find_active_for_vehicle("car").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    vehicle_types: SeaOrmVehicleTypeRepository,
    pricing_tiers: SeaOrmPricingTierRepository,
    calculations: SeaOrmFareCalculationRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            vehicle_types: SeaOrmVehicleTypeRepository::new(db.clone()),
            pricing_tiers: SeaOrmPricingTierRepository::new(db.clone()),
            calculations: SeaOrmFareCalculationRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn vehicle_types(&self) -> &dyn VehicleTypeRepository {
        &self.vehicle_types
    }

    fn pricing_tiers(&self) -> &dyn PricingTierRepository {
        &self.pricing_tiers
    }

    fn calculations(&self) -> &dyn FareCalculationRepository {
        &self.calculations
    }
}
