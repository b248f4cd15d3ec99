//! Vehicle type repository interface

use async_trait::async_trait;

use super::model::VehicleType;
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleTypeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<VehicleType>>;
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<VehicleType>>;
    /// Ordered by name.
    async fn find_all(&self, include_inactive: bool) -> DomainResult<Vec<VehicleType>>;
    async fn save(&self, vehicle: VehicleType) -> DomainResult<VehicleType>;
    async fn update(&self, vehicle: VehicleType) -> DomainResult<VehicleType>;
}
