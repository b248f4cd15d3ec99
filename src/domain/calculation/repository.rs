//! Fare calculation repository interface

use async_trait::async_trait;

use super::model::{CalculationFilter, FareCalculationRecord};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait FareCalculationRepository: Send + Sync {
    /// Insert a new record; the `id` of the argument is ignored.
    async fn save(&self, record: FareCalculationRecord) -> DomainResult<FareCalculationRecord>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<FareCalculationRecord>>;
    async fn find_page(
        &self,
        filter: &CalculationFilter,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<FareCalculationRecord>>;
    async fn find_all(&self, filter: &CalculationFilter) -> DomainResult<Vec<FareCalculationRecord>>;
    async fn count(&self) -> DomainResult<u64>;
}
