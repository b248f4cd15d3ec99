//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::calculation::FareCalculationRepository;
use super::fare::PricingTierRepository;
use super::vehicle::VehicleTypeRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let car = repos.vehicle_types().find_by_name("car").await?;
///     let tiers = repos.pricing_tiers().find_active_for_vehicle("car").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn vehicle_types(&self) -> &dyn VehicleTypeRepository;
    fn pricing_tiers(&self) -> &dyn PricingTierRepository;
    fn calculations(&self) -> &dyn FareCalculationRepository;
}
