//! Fare calculation DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::fare::{format_money, AppliedTier};
use crate::domain::{CalculationSummary, FareCalculationRecord, FareQuote, LineItem};
use crate::interfaces::http::common::PaginatedResponse;

/// Pickup coordinates sent by the client app
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct Location {
    #[validate(range(min = -90.0, max = 90.0, message = "lat must be between -90 and 90"))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "lng must be between -180 and 180"))]
    pub lng: f64,
}

/// Body of `POST /api/v1/fares/calculate`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CalculateFareRequest {
    /// Trip distance in km
    #[schema(value_type = f64, example = 9.74)]
    pub distance: Decimal,
    /// Defaults to the configured vehicle type
    #[validate(length(min = 1, max = 50, message = "vehicle_type must be 1-50 characters"))]
    #[schema(example = "motorcycle")]
    pub vehicle_type: Option<String>,
    /// Defaults to `anonymous`
    #[validate(length(max = 100, message = "client_id must be at most 100 characters"))]
    pub client_id: Option<String>,
    #[validate(nested)]
    pub location: Option<Location>,
}

/// Body of `POST /api/v1/fares/preview`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FarePreviewRequest {
    #[schema(value_type = f64, example = 3.0)]
    pub distance: Decimal,
    #[validate(length(min = 1, max = 50, message = "vehicle_type must be 1-50 characters"))]
    pub vehicle_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LineItemResponse {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

impl From<LineItem> for LineItemResponse {
    fn from(item: LineItem) -> Self {
        Self {
            description: item.description,
            amount: item.amount,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AppliedTierResponse {
    pub tier_id: i32,
    /// e.g. `2-8km` or `8km+`
    pub range: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub per_km_rate: Decimal,
    /// Distance charged inside the tier
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub distance_km: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

impl From<AppliedTier> for AppliedTierResponse {
    fn from(t: AppliedTier) -> Self {
        Self {
            tier_id: t.tier_id,
            range: t.range,
            per_km_rate: t.per_km_rate,
            distance_km: t.distance_km,
            amount: t.amount,
        }
    }
}

/// Priced trip
#[derive(Debug, Serialize, ToSchema)]
pub struct FareQuoteResponse {
    pub vehicle_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub distance_km: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 130.88)]
    pub total_fare: Decimal,
    pub currency: String,
    /// e.g. `130.88 PHP`
    pub formatted_total: String,
    /// One charge per line
    pub breakdown: String,
    pub line_items: Vec<LineItemResponse>,
    pub applied_tiers: Vec<AppliedTierResponse>,
}

impl FareQuoteResponse {
    pub fn new(quote: FareQuote, currency: &str) -> Self {
        Self {
            formatted_total: quote.format_total(currency),
            breakdown: quote.breakdown_text(currency),
            vehicle_type: quote.vehicle_type,
            distance_km: quote.distance_km,
            total_fare: quote.total,
            currency: currency.to_string(),
            line_items: quote.line_items.into_iter().map(Into::into).collect(),
            applied_tiers: quote.applied_tiers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result of a stored calculation
#[derive(Debug, Serialize, ToSchema)]
pub struct CalculateFareResponse {
    pub calculation_id: i32,
    pub client_id: String,
    pub created_at: DateTime<Utc>,
    pub fare: FareQuoteResponse,
}

/// Stored calculation
#[derive(Debug, Serialize, ToSchema)]
pub struct FareCalculationResponse {
    pub id: i32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub distance_km: Decimal,
    pub vehicle_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_fare: Decimal,
    pub formatted_total: String,
    pub breakdown: String,
    pub line_items: Vec<LineItemResponse>,
    pub client_id: String,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<FareCalculationRecord> for FareCalculationResponse {
    fn from(r: FareCalculationRecord) -> Self {
        Self {
            id: r.id,
            distance_km: r.distance_km,
            vehicle_type: r.vehicle_type,
            formatted_total: format_money(r.total_fare),
            total_fare: r.total_fare,
            breakdown: r.breakdown,
            line_items: r.line_items.into_iter().map(Into::into).collect(),
            client_id: r.client_id,
            client_ip: r.client_ip,
            user_agent: r.user_agent,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CalculationSummaryResponse {
    pub total_calculations: u64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub average_fare: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_distance_km: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub min_fare: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub max_fare: Decimal,
}

impl From<CalculationSummary> for CalculationSummaryResponse {
    fn from(s: CalculationSummary) -> Self {
        Self {
            total_calculations: s.total_calculations,
            average_fare: s.average_fare,
            total_distance_km: s.total_distance_km,
            min_fare: s.min_fare,
            max_fare: s.max_fare,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FareHistoryResponse {
    pub calculations: PaginatedResponse<FareCalculationResponse>,
    /// Over every matching record; `null` when nothing matches
    pub summary: Option<CalculationSummaryResponse>,
}

/// Query of `GET /api/v1/fares/history`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Page number, starting at 1
    pub page: Option<u32>,
    /// Page size, 1-100 (default 10)
    pub limit: Option<u32>,
    pub client_id: Option<String>,
    pub vehicle_type: Option<String>,
    /// Inclusive lower bound (RFC 3339)
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound (RFC 3339)
    pub to: Option<DateTime<Utc>>,
    /// `asc` or `desc` (default)
    pub sort: Option<String>,
}
