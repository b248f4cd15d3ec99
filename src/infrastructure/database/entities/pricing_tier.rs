//! Pricing tier entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of a vehicle's fare schedule
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pricing_tiers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub vehicle_type: String,

    /// Lower bound in meters
    pub min_distance_m: i64,

    /// Upper bound in meters (NULL = unbounded)
    pub max_distance_m: Option<i64>,

    /// Flat charge in cents
    pub base_fare_cents: i64,

    /// Charge per km in cents
    pub per_km_rate_cents: i64,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
