//! SeaORM implementation of VehicleTypeRepository

use async_trait::async_trait;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::db_err;
use crate::domain::vehicle::{VehicleType, VehicleTypeRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::vehicle_type;

fn entity_to_domain(v: vehicle_type::Model) -> VehicleType {
    VehicleType {
        id: v.id,
        name: v.name,
        display_name: v.display_name,
        icon: v.icon,
        is_active: v.is_active,
        created_at: v.created_at,
    }
}

pub struct SeaOrmVehicleTypeRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleTypeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VehicleTypeRepository for SeaOrmVehicleTypeRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<VehicleType>> {
        let model = vehicle_type::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<VehicleType>> {
        let model = vehicle_type::Entity::find()
            .filter(vehicle_type::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self, include_inactive: bool) -> DomainResult<Vec<VehicleType>> {
        let mut query = vehicle_type::Entity::find();
        if !include_inactive {
            query = query.filter(vehicle_type::Column::IsActive.eq(true));
        }
        let models = query
            .order_by_asc(vehicle_type::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, v: VehicleType) -> DomainResult<VehicleType> {
        let model = vehicle_type::ActiveModel {
            id: NotSet,
            name: Set(v.name),
            display_name: Set(v.display_name),
            icon: Set(v.icon),
            is_active: Set(v.is_active),
            created_at: Set(v.created_at),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("Vehicle type saved: {} ({})", result.name, result.id);
        Ok(entity_to_domain(result))
    }

    async fn update(&self, v: VehicleType) -> DomainResult<VehicleType> {
        let existing = vehicle_type::Entity::find_by_id(v.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("VehicleType", "id", v.id));
        };

        let mut model: vehicle_type::ActiveModel = existing.into();
        model.display_name = Set(v.display_name);
        model.icon = Set(v.icon);
        model.is_active = Set(v.is_active);
        let result = model.update(&self.db).await.map_err(db_err)?;
        Ok(entity_to_domain(result))
    }
}
