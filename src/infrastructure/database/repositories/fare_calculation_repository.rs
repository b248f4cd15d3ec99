//! SeaORM implementation of FareCalculationRepository

use async_trait::async_trait;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use super::{db_err, from_cents, from_meters, to_cents, to_meters};
use crate::domain::calculation::{
    CalculationFilter, FareCalculationRecord, FareCalculationRepository, SortOrder,
};
use crate::domain::fare::LineItem;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::fare_calculation;
use crate::shared::errors::InfraError;
use crate::shared::{PaginatedResult, PaginationParams};

fn entity_to_domain(c: fare_calculation::Model) -> DomainResult<FareCalculationRecord> {
    let line_items: Vec<LineItem> =
        serde_json::from_str(&c.line_items).map_err(|e| DomainError::from(InfraError::from(e)))?;

    Ok(FareCalculationRecord {
        id: c.id,
        distance_km: from_meters(c.distance_m),
        vehicle_type: c.vehicle_type,
        total_fare: from_cents(c.total_fare_cents),
        breakdown: c.breakdown,
        line_items,
        client_id: c.client_id,
        client_ip: c.client_ip,
        user_agent: c.user_agent,
        created_at: c.created_at,
    })
}

fn filtered(filter: &CalculationFilter) -> Select<fare_calculation::Entity> {
    let mut query = fare_calculation::Entity::find();

    if let Some(ref client_id) = filter.client_id {
        query = query.filter(fare_calculation::Column::ClientId.eq(client_id.as_str()));
    }
    if let Some(ref vehicle_type) = filter.vehicle_type {
        query = query.filter(fare_calculation::Column::VehicleType.eq(vehicle_type.as_str()));
    }
    if let Some(from) = filter.from {
        query = query.filter(fare_calculation::Column::CreatedAt.gte(from));
    }
    if let Some(to) = filter.to {
        query = query.filter(fare_calculation::Column::CreatedAt.lte(to));
    }

    match filter.sort {
        SortOrder::Asc => query
            .order_by_asc(fare_calculation::Column::CreatedAt)
            .order_by_asc(fare_calculation::Column::Id),
        SortOrder::Desc => query
            .order_by_desc(fare_calculation::Column::CreatedAt)
            .order_by_desc(fare_calculation::Column::Id),
    }
}

pub struct SeaOrmFareCalculationRepository {
    db: DatabaseConnection,
}

impl SeaOrmFareCalculationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FareCalculationRepository for SeaOrmFareCalculationRepository {
    async fn save(&self, record: FareCalculationRecord) -> DomainResult<FareCalculationRecord> {
        let line_items = serde_json::to_string(&record.line_items)
            .map_err(|e| DomainError::from(InfraError::from(e)))?;

        let model = fare_calculation::ActiveModel {
            id: NotSet,
            distance_m: Set(to_meters(record.distance_km)?),
            vehicle_type: Set(record.vehicle_type),
            total_fare_cents: Set(to_cents(record.total_fare)?),
            breakdown: Set(record.breakdown),
            line_items: Set(line_items),
            client_id: Set(record.client_id),
            client_ip: Set(record.client_ip),
            user_agent: Set(record.user_agent),
            created_at: Set(record.created_at),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!(
            "Fare calculation saved: {} {}m = {} cents ({})",
            result.vehicle_type, result.distance_m, result.total_fare_cents, result.id
        );
        entity_to_domain(result)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<FareCalculationRecord>> {
        let model = fare_calculation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(entity_to_domain).transpose()
    }

    async fn find_page(
        &self,
        filter: &CalculationFilter,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<FareCalculationRecord>> {
        let query = filtered(filter);

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let models = query
            .offset(pagination.offset())
            .limit(pagination.limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = models
            .into_iter()
            .map(entity_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(PaginatedResult::new(
            items,
            total,
            pagination.page,
            pagination.limit,
        ))
    }

    async fn find_all(&self, filter: &CalculationFilter) -> DomainResult<Vec<FareCalculationRecord>> {
        let models = filtered(filter).all(&self.db).await.map_err(db_err)?;
        models.into_iter().map(entity_to_domain).collect()
    }

    async fn count(&self) -> DomainResult<u64> {
        fare_calculation::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
