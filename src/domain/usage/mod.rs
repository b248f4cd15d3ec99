//! Usage metrics

pub mod report;

pub use report::{
    DailyStat, HourlyStat, PeriodStats, UsageOverview, UsagePeriod, UsageReport, VehicleTypeCount,
};
