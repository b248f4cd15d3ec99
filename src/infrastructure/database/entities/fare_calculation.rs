//! Fare calculation history entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Audit entry written once per successful calculation, never updated
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fare_calculations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Trip distance in meters
    pub distance_m: i64,

    pub vehicle_type: String,

    /// Total fare in cents
    pub total_fare_cents: i64,

    /// Human-readable breakdown, one charge per line
    pub breakdown: String,

    /// JSON array of `{description, amount}`
    pub line_items: String,

    pub client_id: String,

    pub client_ip: Option<String>,

    pub user_agent: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
