//! Pricing tier repository interface

use async_trait::async_trait;

use super::model::PricingTier;
use crate::domain::DomainResult;

#[async_trait]
pub trait PricingTierRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<PricingTier>>;
    /// Ordered by vehicle type, then `min_distance_km`.
    async fn find_all(&self, include_inactive: bool) -> DomainResult<Vec<PricingTier>>;
    /// Active tiers of one vehicle type, read in a single query.
    async fn find_active_for_vehicle(&self, vehicle_type: &str) -> DomainResult<Vec<PricingTier>>;
    async fn save(&self, tier: PricingTier) -> DomainResult<PricingTier>;
    async fn update(&self, tier: PricingTier) -> DomainResult<PricingTier>;
}
