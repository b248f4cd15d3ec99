//! Usage metrics computed from fare calculation records

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use rust_decimal::Decimal;

use crate::domain::calculation::FareCalculationRecord;
use crate::domain::fare::round_money;

/// Number of trailing days covered by `daily_stats`.
const DAILY_WINDOW_DAYS: i64 = 7;

/// Look-back window of a usage report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UsagePeriod {
    LastHour,
    LastDay,
    #[default]
    LastWeek,
    LastMonth,
    LastYear,
}

impl UsagePeriod {
    /// `1h`, `24h`, `7d`, `30d` or `1y`; anything else falls back to `7d`.
    pub fn parse(s: &str) -> Self {
        match s {
            "1h" => Self::LastHour,
            "24h" => Self::LastDay,
            "30d" => Self::LastMonth,
            "1y" => Self::LastYear,
            _ => Self::LastWeek,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LastHour => "1h",
            Self::LastDay => "24h",
            Self::LastWeek => "7d",
            Self::LastMonth => "30d",
            Self::LastYear => "1y",
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            Self::LastHour => Duration::hours(1),
            Self::LastDay => Duration::hours(24),
            Self::LastWeek => Duration::days(7),
            Self::LastMonth => Duration::days(30),
            Self::LastYear => Duration::days(365),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageOverview {
    pub total_calculations: u64,
    pub average_fare: Decimal,
    pub last_calculation_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodStats {
    pub duration: String,
    pub calculations: u64,
    pub average_fare: Decimal,
    pub total_revenue: Decimal,
    pub unique_clients: u64,
    pub vehicle_type_breakdown: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleTypeCount {
    pub vehicle_type: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub calculations: u64,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyStat {
    /// UTC hour of day, 0-23
    pub hour: u32,
    pub count: u64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageReport {
    pub overview: UsageOverview,
    pub period: PeriodStats,
    /// All-time counts, most used first
    pub popular_vehicle_types: Vec<VehicleTypeCount>,
    /// One entry per UTC day, oldest first, today last
    pub daily_stats: Vec<DailyStat>,
    /// Hours of the current UTC day that saw calculations
    pub hourly_distribution: Vec<HourlyStat>,
}

impl UsageReport {
    pub fn build(records: &[FareCalculationRecord], period: UsagePeriod, now: DateTime<Utc>) -> Self {
        let overview = UsageOverview {
            total_calculations: records.len() as u64,
            average_fare: average(records.iter().map(|r| r.total_fare)),
            last_calculation_at: records.iter().map(|r| r.created_at).max(),
        };

        let period_start = now - period.duration();
        let in_period: Vec<&FareCalculationRecord> = records
            .iter()
            .filter(|r| r.created_at >= period_start && r.created_at <= now)
            .collect();

        let mut vehicle_type_breakdown = BTreeMap::new();
        for r in &in_period {
            *vehicle_type_breakdown.entry(r.vehicle_type.clone()).or_insert(0u64) += 1;
        }
        let unique_clients = in_period
            .iter()
            .map(|r| r.client_id.as_str())
            .collect::<BTreeSet<_>>()
            .len() as u64;

        let period = PeriodStats {
            duration: period.label().to_string(),
            calculations: in_period.len() as u64,
            average_fare: average(in_period.iter().map(|r| r.total_fare)),
            total_revenue: in_period.iter().map(|r| r.total_fare).sum(),
            unique_clients,
            vehicle_type_breakdown,
        };

        Self {
            overview,
            period,
            popular_vehicle_types: popular_vehicle_types(records),
            daily_stats: daily_stats(records, now),
            hourly_distribution: hourly_distribution(records, now),
        }
    }
}

fn average(fares: impl Iterator<Item = Decimal>) -> Decimal {
    let (sum, count) = fares.fold((Decimal::ZERO, 0u64), |(sum, n), fare| (sum + fare, n + 1));
    if count == 0 {
        Decimal::ZERO
    } else {
        round_money(sum / Decimal::from(count))
    }
}

fn popular_vehicle_types(records: &[FareCalculationRecord]) -> Vec<VehicleTypeCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for r in records {
        *counts.entry(r.vehicle_type.as_str()).or_insert(0) += 1;
    }

    let mut popular: Vec<VehicleTypeCount> = counts
        .into_iter()
        .map(|(vehicle_type, count)| VehicleTypeCount {
            vehicle_type: vehicle_type.to_string(),
            count,
        })
        .collect();
    popular.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.vehicle_type.cmp(&b.vehicle_type)));
    popular
}

fn daily_stats(records: &[FareCalculationRecord], now: DateTime<Utc>) -> Vec<DailyStat> {
    let today = now.date_naive();
    (0..DAILY_WINDOW_DAYS)
        .rev()
        .map(|days_back| {
            let date = today - Duration::days(days_back);
            let day: Vec<&FareCalculationRecord> = records
                .iter()
                .filter(|r| r.created_at.date_naive() == date)
                .collect();
            DailyStat {
                date,
                calculations: day.len() as u64,
                total_revenue: day.iter().map(|r| r.total_fare).sum(),
            }
        })
        .collect()
}

fn hourly_distribution(records: &[FareCalculationRecord], now: DateTime<Utc>) -> Vec<HourlyStat> {
    let today = now.date_naive();
    let mut hours: BTreeMap<u32, (u64, Decimal)> = BTreeMap::new();
    for r in records.iter().filter(|r| r.created_at.date_naive() == today) {
        let entry = hours.entry(r.created_at.hour()).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += r.total_fare;
    }

    hours
        .into_iter()
        .map(|(hour, (count, revenue))| HourlyStat { hour, count, revenue })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 15, 30, 0).unwrap()
    }

    fn record(client: &str, vehicle: &str, total: &str, at: DateTime<Utc>) -> FareCalculationRecord {
        FareCalculationRecord {
            id: 0,
            distance_km: d("3"),
            vehicle_type: vehicle.into(),
            total_fare: d(total),
            breakdown: String::new(),
            line_items: vec![],
            client_id: client.into(),
            client_ip: None,
            user_agent: None,
            created_at: at,
        }
    }

    fn sample() -> Vec<FareCalculationRecord> {
        let now = now();
        vec![
            record("a", "car", "60.00", now - Duration::minutes(10)),
            record("b", "motorcycle", "50.00", now - Duration::hours(2)),
            record("a", "car", "130.88", now - Duration::days(3)),
            record("c", "car", "110.00", now - Duration::days(20)),
        ]
    }

    #[test]
    fn period_parsing_falls_back_to_week() {
        assert_eq!(UsagePeriod::parse("1h"), UsagePeriod::LastHour);
        assert_eq!(UsagePeriod::parse("24h"), UsagePeriod::LastDay);
        assert_eq!(UsagePeriod::parse("30d"), UsagePeriod::LastMonth);
        assert_eq!(UsagePeriod::parse("1y"), UsagePeriod::LastYear);
        assert_eq!(UsagePeriod::parse("forever"), UsagePeriod::LastWeek);
        assert_eq!(UsagePeriod::default().label(), "7d");
    }

    #[test]
    fn overview_covers_all_records() {
        let report = UsageReport::build(&sample(), UsagePeriod::LastWeek, now());
        assert_eq!(report.overview.total_calculations, 4);
        assert_eq!(report.overview.average_fare, d("87.72"));
        assert_eq!(
            report.overview.last_calculation_at,
            Some(now() - Duration::minutes(10))
        );
    }

    #[test]
    fn period_stats_only_count_the_window() {
        let report = UsageReport::build(&sample(), UsagePeriod::LastWeek, now());
        let period = &report.period;
        assert_eq!(period.duration, "7d");
        assert_eq!(period.calculations, 3);
        assert_eq!(period.total_revenue, d("240.88"));
        assert_eq!(period.average_fare, d("80.29"));
        assert_eq!(period.unique_clients, 2);
        assert_eq!(period.vehicle_type_breakdown.get("car"), Some(&2));
        assert_eq!(period.vehicle_type_breakdown.get("motorcycle"), Some(&1));

        let hour = UsageReport::build(&sample(), UsagePeriod::LastHour, now());
        assert_eq!(hour.period.calculations, 1);
        assert_eq!(hour.period.total_revenue, d("60.00"));
    }

    #[test]
    fn popular_vehicle_types_are_sorted_by_count() {
        let report = UsageReport::build(&sample(), UsagePeriod::LastWeek, now());
        let popular: Vec<(&str, u64)> = report
            .popular_vehicle_types
            .iter()
            .map(|v| (v.vehicle_type.as_str(), v.count))
            .collect();
        assert_eq!(popular, vec![("car", 3), ("motorcycle", 1)]);
    }

    #[test]
    fn daily_stats_cover_seven_days_ending_today() {
        let report = UsageReport::build(&sample(), UsagePeriod::LastWeek, now());
        assert_eq!(report.daily_stats.len(), 7);
        let today = report.daily_stats.last().unwrap();
        assert_eq!(today.date, now().date_naive());
        assert_eq!(today.calculations, 2);
        assert_eq!(today.total_revenue, d("110.00"));

        let three_days_ago = &report.daily_stats[3];
        assert_eq!(three_days_ago.date, (now() - Duration::days(3)).date_naive());
        assert_eq!(three_days_ago.calculations, 1);
        assert_eq!(report.daily_stats[0].calculations, 0);
    }

    #[test]
    fn hourly_distribution_covers_today_only() {
        let report = UsageReport::build(&sample(), UsagePeriod::LastWeek, now());
        let hours: Vec<(u32, u64)> = report
            .hourly_distribution
            .iter()
            .map(|h| (h.hour, h.count))
            .collect();
        assert_eq!(hours, vec![(13, 1), (15, 1)]);
    }

    #[test]
    fn empty_report_is_zeroed() {
        let report = UsageReport::build(&[], UsagePeriod::LastDay, now());
        assert_eq!(report.overview.total_calculations, 0);
        assert_eq!(report.overview.average_fare, Decimal::ZERO);
        assert_eq!(report.period.calculations, 0);
        assert!(report.popular_vehicle_types.is_empty());
        assert!(report.hourly_distribution.is_empty());
        assert_eq!(report.daily_stats.len(), 7);
    }
}
