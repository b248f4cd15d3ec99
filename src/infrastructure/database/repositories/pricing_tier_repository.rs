//! SeaORM implementation of PricingTierRepository

use async_trait::async_trait;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::{db_err, from_cents, from_meters, to_cents, to_meters};
use crate::domain::fare::{PricingTier, PricingTierRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::pricing_tier;

fn entity_to_domain(t: pricing_tier::Model) -> PricingTier {
    PricingTier {
        id: t.id,
        vehicle_type: t.vehicle_type,
        min_distance_km: from_meters(t.min_distance_m),
        max_distance_km: t.max_distance_m.map(from_meters),
        base_fare: from_cents(t.base_fare_cents),
        per_km_rate: from_cents(t.per_km_rate_cents),
        is_active: t.is_active,
        created_at: t.created_at,
        updated_at: t.updated_at,
    }
}

pub struct SeaOrmPricingTierRepository {
    db: DatabaseConnection,
}

impl SeaOrmPricingTierRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PricingTierRepository for SeaOrmPricingTierRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<PricingTier>> {
        let model = pricing_tier::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self, include_inactive: bool) -> DomainResult<Vec<PricingTier>> {
        let mut query = pricing_tier::Entity::find();
        if !include_inactive {
            query = query.filter(pricing_tier::Column::IsActive.eq(true));
        }
        let models = query
            .order_by_asc(pricing_tier::Column::VehicleType)
            .order_by_asc(pricing_tier::Column::MinDistanceM)
            .order_by_asc(pricing_tier::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn find_active_for_vehicle(&self, vehicle_type: &str) -> DomainResult<Vec<PricingTier>> {
        let models = pricing_tier::Entity::find()
            .filter(pricing_tier::Column::VehicleType.eq(vehicle_type))
            .filter(pricing_tier::Column::IsActive.eq(true))
            .order_by_asc(pricing_tier::Column::MinDistanceM)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, t: PricingTier) -> DomainResult<PricingTier> {
        let model = pricing_tier::ActiveModel {
            id: NotSet,
            vehicle_type: Set(t.vehicle_type),
            min_distance_m: Set(to_meters(t.min_distance_km)?),
            max_distance_m: Set(t.max_distance_km.map(to_meters).transpose()?),
            base_fare_cents: Set(to_cents(t.base_fare)?),
            per_km_rate_cents: Set(to_cents(t.per_km_rate)?),
            is_active: Set(t.is_active),
            created_at: Set(t.created_at),
            updated_at: Set(t.updated_at),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!(
            "Pricing tier saved: {} {}m.. ({})",
            result.vehicle_type, result.min_distance_m, result.id
        );
        Ok(entity_to_domain(result))
    }

    async fn update(&self, t: PricingTier) -> DomainResult<PricingTier> {
        let existing = pricing_tier::Entity::find_by_id(t.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("PricingTier", "id", t.id));
        };

        let model = pricing_tier::ActiveModel {
            id: Set(t.id),
            vehicle_type: Set(t.vehicle_type),
            min_distance_m: Set(to_meters(t.min_distance_km)?),
            max_distance_m: Set(t.max_distance_km.map(to_meters).transpose()?),
            base_fare_cents: Set(to_cents(t.base_fare)?),
            per_km_rate_cents: Set(to_cents(t.per_km_rate)?),
            is_active: Set(t.is_active),
            created_at: Set(existing.created_at),
            updated_at: Set(t.updated_at),
        };
        let result = model.update(&self.db).await.map_err(db_err)?;
        Ok(entity_to_domain(result))
    }
}
