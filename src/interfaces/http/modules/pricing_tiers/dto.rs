//! Pricing tier DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{NewPricingTier, PricingTierChanges};
use crate::domain::PricingTier;

#[derive(Debug, Serialize, ToSchema)]
pub struct PricingTierResponse {
    pub id: i32,
    pub vehicle_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub min_distance_km: Decimal,
    /// `null` = unbounded
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub max_distance_km: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub base_fare: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub per_km_rate: Decimal,
    /// e.g. `2-8km`
    pub range: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PricingTier> for PricingTierResponse {
    fn from(t: PricingTier) -> Self {
        Self {
            range: t.range_label(),
            id: t.id,
            vehicle_type: t.vehicle_type,
            min_distance_km: t.min_distance_km,
            max_distance_km: t.max_distance_km,
            base_fare: t.base_fare,
            per_km_rate: t.per_km_rate,
            is_active: t.is_active,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePricingTierRequest {
    #[validate(length(min = 1, max = 50, message = "vehicle_type is required"))]
    pub vehicle_type: String,
    #[schema(value_type = f64, example = 8.0)]
    pub min_distance_km: Decimal,
    /// Omit or `null` for an unbounded last tier
    #[schema(value_type = Option<f64>, example = 20.0)]
    pub max_distance_km: Option<Decimal>,
    #[schema(value_type = f64, example = 0.0)]
    pub base_fare: Decimal,
    #[schema(value_type = f64, example = 12.0)]
    pub per_km_rate: Decimal,
}

impl From<CreatePricingTierRequest> for NewPricingTier {
    fn from(req: CreatePricingTierRequest) -> Self {
        Self {
            vehicle_type: req.vehicle_type,
            min_distance_km: req.min_distance_km,
            max_distance_km: req.max_distance_km,
            base_fare: req.base_fare,
            per_km_rate: req.per_km_rate,
        }
    }
}

/// Partial update. An explicit `"max_distance_km": null` makes the tier unbounded,
/// leaving the field out keeps the current bound.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePricingTierRequest {
    #[schema(value_type = Option<f64>)]
    pub min_distance_km: Option<Decimal>,
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<f64>)]
    pub max_distance_km: Option<Option<Decimal>>,
    #[schema(value_type = Option<f64>)]
    pub base_fare: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub per_km_rate: Option<Decimal>,
    pub is_active: Option<bool>,
}

impl From<UpdatePricingTierRequest> for PricingTierChanges {
    fn from(req: UpdatePricingTierRequest) -> Self {
        Self {
            min_distance_km: req.min_distance_km,
            max_distance_km: req.max_distance_km,
            base_fare: req.base_fare,
            per_km_rate: req.per_km_rate,
            is_active: req.is_active,
        }
    }
}

/// Distinguishes a present `null` from a missing field.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<Decimal>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Decimal>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPricingTiersQuery {
    pub vehicle_type: Option<String>,
    /// Include soft-deleted tiers
    #[serde(default)]
    pub include_inactive: bool,
}
