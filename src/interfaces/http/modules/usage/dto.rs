//! Usage report DTOs

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::usage::{
    DailyStat, HourlyStat, PeriodStats, UsageOverview, UsageReport, VehicleTypeCount,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UsageQuery {
    /// `1h`, `24h`, `7d` (default), `30d` or `1y`
    pub period: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsageOverviewResponse {
    pub total_calculations: u64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub average_fare: Decimal,
    pub last_calculation_at: Option<DateTime<Utc>>,
}

impl From<UsageOverview> for UsageOverviewResponse {
    fn from(o: UsageOverview) -> Self {
        Self {
            total_calculations: o.total_calculations,
            average_fare: o.average_fare,
            last_calculation_at: o.last_calculation_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PeriodStatsResponse {
    /// Period label, e.g. `7d`
    pub duration: String,
    pub calculations: u64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub average_fare: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_revenue: Decimal,
    pub unique_clients: u64,
    pub vehicle_type_breakdown: BTreeMap<String, u64>,
}

impl From<PeriodStats> for PeriodStatsResponse {
    fn from(p: PeriodStats) -> Self {
        Self {
            duration: p.duration,
            calculations: p.calculations,
            average_fare: p.average_fare,
            total_revenue: p.total_revenue,
            unique_clients: p.unique_clients,
            vehicle_type_breakdown: p.vehicle_type_breakdown,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleTypeCountResponse {
    pub vehicle_type: String,
    pub count: u64,
}

impl From<VehicleTypeCount> for VehicleTypeCountResponse {
    fn from(v: VehicleTypeCount) -> Self {
        Self {
            vehicle_type: v.vehicle_type,
            count: v.count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DailyStatResponse {
    pub date: NaiveDate,
    pub calculations: u64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_revenue: Decimal,
}

impl From<DailyStat> for DailyStatResponse {
    fn from(d: DailyStat) -> Self {
        Self {
            date: d.date,
            calculations: d.calculations,
            total_revenue: d.total_revenue,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HourlyStatResponse {
    /// UTC hour, 0-23
    pub hour: u32,
    pub count: u64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub revenue: Decimal,
}

impl From<HourlyStat> for HourlyStatResponse {
    fn from(h: HourlyStat) -> Self {
        Self {
            hour: h.hour,
            count: h.count,
            revenue: h.revenue,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsageReportResponse {
    pub overview: UsageOverviewResponse,
    pub period: PeriodStatsResponse,
    pub popular_vehicle_types: Vec<VehicleTypeCountResponse>,
    pub daily_stats: Vec<DailyStatResponse>,
    pub hourly_distribution: Vec<HourlyStatResponse>,
}

impl From<UsageReport> for UsageReportResponse {
    fn from(r: UsageReport) -> Self {
        Self {
            overview: r.overview.into(),
            period: r.period.into(),
            popular_vehicle_types: r.popular_vehicle_types.into_iter().map(Into::into).collect(),
            daily_stats: r.daily_stats.into_iter().map(Into::into).collect(),
            hourly_distribution: r.hourly_distribution.into_iter().map(Into::into).collect(),
        }
    }
}
