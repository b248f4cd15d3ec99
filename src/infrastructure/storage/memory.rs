//! In-memory repositories for development and testing

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;

use crate::domain::calculation::{
    CalculationFilter, FareCalculationRecord, FareCalculationRepository, SortOrder,
};
use crate::domain::fare::{PricingTier, PricingTierRepository};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::vehicle::{VehicleType, VehicleTypeRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::seed::{DEFAULT_SCHEDULE, VEHICLE_TYPES};
use crate::shared::{PaginatedResult, PaginationParams};

// ── Vehicle types ───────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryVehicleTypeRepository {
    vehicles: DashMap<i32, VehicleType>,
    counter: AtomicI32,
}

#[async_trait]
impl VehicleTypeRepository for InMemoryVehicleTypeRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<VehicleType>> {
        Ok(self.vehicles.get(&id).map(|v| v.value().clone()))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<VehicleType>> {
        Ok(self
            .vehicles
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value().clone()))
    }

    async fn find_all(&self, include_inactive: bool) -> DomainResult<Vec<VehicleType>> {
        let mut vehicles: Vec<VehicleType> = self
            .vehicles
            .iter()
            .filter(|v| include_inactive || v.is_active)
            .map(|v| v.value().clone())
            .collect();
        vehicles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(vehicles)
    }

    async fn save(&self, mut vehicle: VehicleType) -> DomainResult<VehicleType> {
        if self.vehicles.iter().any(|v| v.name == vehicle.name) {
            return Err(DomainError::Conflict(format!(
                "vehicle type '{}' already exists",
                vehicle.name
            )));
        }
        vehicle.id = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, vehicle: VehicleType) -> DomainResult<VehicleType> {
        let mut entry = self
            .vehicles
            .get_mut(&vehicle.id)
            .ok_or_else(|| DomainError::not_found("VehicleType", "id", vehicle.id))?;
        *entry = vehicle.clone();
        Ok(vehicle)
    }
}

// ── Pricing tiers ───────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryPricingTierRepository {
    tiers: DashMap<i32, PricingTier>,
    counter: AtomicI32,
}

impl InMemoryPricingTierRepository {
    fn sorted(&self, keep: impl Fn(&PricingTier) -> bool) -> Vec<PricingTier> {
        let mut tiers: Vec<PricingTier> = self
            .tiers
            .iter()
            .filter(|t| keep(t.value()))
            .map(|t| t.value().clone())
            .collect();
        tiers.sort_by(|a, b| {
            a.vehicle_type
                .cmp(&b.vehicle_type)
                .then_with(|| a.min_distance_km.cmp(&b.min_distance_km))
                .then_with(|| a.id.cmp(&b.id))
        });
        tiers
    }
}

#[async_trait]
impl PricingTierRepository for InMemoryPricingTierRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<PricingTier>> {
        Ok(self.tiers.get(&id).map(|t| t.value().clone()))
    }

    async fn find_all(&self, include_inactive: bool) -> DomainResult<Vec<PricingTier>> {
        Ok(self.sorted(|t| include_inactive || t.is_active))
    }

    async fn find_active_for_vehicle(&self, vehicle_type: &str) -> DomainResult<Vec<PricingTier>> {
        Ok(self.sorted(|t| t.is_active && t.vehicle_type == vehicle_type))
    }

    async fn save(&self, mut tier: PricingTier) -> DomainResult<PricingTier> {
        tier.id = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.tiers.insert(tier.id, tier.clone());
        Ok(tier)
    }

    async fn update(&self, tier: PricingTier) -> DomainResult<PricingTier> {
        let mut entry = self
            .tiers
            .get_mut(&tier.id)
            .ok_or_else(|| DomainError::not_found("PricingTier", "id", tier.id))?;
        let created_at = entry.created_at;
        *entry = PricingTier {
            created_at,
            ..tier
        };
        Ok(entry.value().clone())
    }
}

// ── Fare calculations ───────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryFareCalculationRepository {
    records: DashMap<i32, FareCalculationRecord>,
    counter: AtomicI32,
}

impl InMemoryFareCalculationRepository {
    fn matching(&self, filter: &CalculationFilter) -> Vec<FareCalculationRecord> {
        let mut records: Vec<FareCalculationRecord> = self
            .records
            .iter()
            .filter(|r| filter.matches(r.value()))
            .map(|r| r.value().clone())
            .collect();
        records.sort_by(|a, b| {
            let oldest_first = a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id));
            match filter.sort {
                SortOrder::Asc => oldest_first,
                SortOrder::Desc => oldest_first.reverse(),
            }
        });
        records
    }
}

#[async_trait]
impl FareCalculationRepository for InMemoryFareCalculationRepository {
    async fn save(&self, mut record: FareCalculationRecord) -> DomainResult<FareCalculationRecord> {
        record.id = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<FareCalculationRecord>> {
        Ok(self.records.get(&id).map(|r| r.value().clone()))
    }

    async fn find_page(
        &self,
        filter: &CalculationFilter,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<FareCalculationRecord>> {
        let records = self.matching(filter);
        let total = records.len() as u64;
        let items = records
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .collect();
        Ok(PaginatedResult::new(
            items,
            total,
            pagination.page,
            pagination.limit,
        ))
    }

    async fn find_all(&self, filter: &CalculationFilter) -> DomainResult<Vec<FareCalculationRecord>> {
        Ok(self.matching(filter))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.records.len() as u64)
    }
}

// ── Provider ────────────────────────────────────────────────────

/// Repository provider keeping everything in process memory.
///
/// Data is lost on restart. Used by `--in-memory` runs and tests.
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    vehicle_types: InMemoryVehicleTypeRepository,
    pricing_tiers: InMemoryPricingTierRepository,
    calculations: InMemoryFareCalculationRepository,
}

impl InMemoryRepositoryProvider {
    /// Empty provider without vehicle types or tiers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider holding the same vehicle types and schedule the migrations seed.
    pub fn seeded() -> Self {
        let provider = Self::new();
        let now = Utc::now();

        for (name, display_name, icon) in VEHICLE_TYPES {
            let id = provider.vehicle_types.counter.fetch_add(1, Ordering::SeqCst) + 1;
            provider.vehicle_types.vehicles.insert(
                id,
                VehicleType {
                    id,
                    name: name.to_string(),
                    display_name: display_name.to_string(),
                    icon: Some(icon.to_string()),
                    is_active: true,
                    created_at: now,
                },
            );

            for seed in DEFAULT_SCHEDULE {
                let id = provider.pricing_tiers.counter.fetch_add(1, Ordering::SeqCst) + 1;
                provider.pricing_tiers.tiers.insert(
                    id,
                    PricingTier {
                        id,
                        vehicle_type: name.to_string(),
                        min_distance_km: Decimal::new(seed.min_distance_m, 3),
                        max_distance_km: seed.max_distance_m.map(|m| Decimal::new(m, 3)),
                        base_fare: Decimal::new(seed.base_fare_cents, 2),
                        per_km_rate: Decimal::new(seed.per_km_rate_cents, 2),
                        is_active: true,
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
        }

        provider
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
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
