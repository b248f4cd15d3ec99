//! Fare calculation audit records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::fare::{round_distance, round_money, LineItem};

/// Client id recorded when the caller does not send one.
pub const ANONYMOUS_CLIENT: &str = "anonymous";

/// Immutable audit entry, written once per successful calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct FareCalculationRecord {
    pub id: i32,
    pub distance_km: Decimal,
    pub vehicle_type: String,
    pub total_fare: Decimal,
    /// Human-readable breakdown, one charge per line
    pub breakdown: String,
    pub line_items: Vec<LineItem>,
    pub client_id: String,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

/// History query filter. All fields are optional and combined with AND.
#[derive(Debug, Clone, Default)]
pub struct CalculationFilter {
    pub client_id: Option<String>,
    pub vehicle_type: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    /// Order by creation time
    pub sort: SortOrder,
}

impl CalculationFilter {
    pub fn since(from: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            ..Default::default()
        }
    }

    pub fn matches(&self, record: &FareCalculationRecord) -> bool {
        if let Some(ref client_id) = self.client_id {
            if &record.client_id != client_id {
                return false;
            }
        }
        if let Some(ref vehicle_type) = self.vehicle_type {
            if &record.vehicle_type != vehicle_type {
                return false;
            }
        }
        if let Some(from) = self.from {
            if record.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if record.created_at > to {
                return false;
            }
        }
        true
    }
}

/// Aggregate over the records matching a history query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationSummary {
    pub total_calculations: u64,
    pub average_fare: Decimal,
    pub total_distance_km: Decimal,
    pub min_fare: Decimal,
    pub max_fare: Decimal,
}

impl CalculationSummary {
    /// `None` when there is nothing to summarize.
    pub fn from_records(records: &[FareCalculationRecord]) -> Option<Self> {
        let first = records.first()?;

        let mut total_fare = Decimal::ZERO;
        let mut total_distance_km = Decimal::ZERO;
        let mut min_fare = first.total_fare;
        let mut max_fare = first.total_fare;

        for record in records {
            total_fare += record.total_fare;
            total_distance_km += record.distance_km;
            min_fare = min_fare.min(record.total_fare);
            max_fare = max_fare.max(record.total_fare);
        }

        let count = records.len() as u64;
        Some(Self {
            total_calculations: count,
            average_fare: round_money(total_fare / Decimal::from(count)),
            total_distance_km: round_distance(total_distance_km),
            min_fare,
            max_fare,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(id: i32, client: &str, vehicle: &str, distance: &str, total: &str) -> FareCalculationRecord {
        FareCalculationRecord {
            id,
            distance_km: d(distance),
            vehicle_type: vehicle.into(),
            total_fare: d(total),
            breakdown: String::new(),
            line_items: vec![],
            client_id: client.into(),
            client_ip: None,
            user_agent: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn summary_of_nothing_is_none() {
        assert!(CalculationSummary::from_records(&[]).is_none());
    }

    #[test]
    fn summary_aggregates_fares_and_distance() {
        let records = vec![
            record(1, "a", "car", "2", "50.00"),
            record(2, "a", "car", "3", "60.00"),
            record(3, "b", "motorcycle", "9.74", "130.88"),
        ];
        let summary = CalculationSummary::from_records(&records).unwrap();
        assert_eq!(summary.total_calculations, 3);
        assert_eq!(summary.average_fare, d("80.29"));
        assert_eq!(summary.total_distance_km, d("14.74"));
        assert_eq!(summary.min_fare, d("50.00"));
        assert_eq!(summary.max_fare, d("130.88"));
    }

    #[test]
    fn filter_matches_all_criteria() {
        let r = record(1, "kiosk-1", "car", "3", "60.00");
        assert!(CalculationFilter::default().matches(&r));
        assert!(CalculationFilter {
            client_id: Some("kiosk-1".into()),
            vehicle_type: Some("car".into()),
            ..Default::default()
        }
        .matches(&r));
        assert!(!CalculationFilter {
            vehicle_type: Some("motorcycle".into()),
            ..Default::default()
        }
        .matches(&r));
        assert!(!CalculationFilter::since(Utc::now() + Duration::hours(1)).matches(&r));
        assert!(!CalculationFilter {
            to: Some(Utc::now() - Duration::hours(1)),
            ..Default::default()
        }
        .matches(&r));
    }

    #[test]
    fn sort_order_parsing() {
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("ASC"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("whatever"), SortOrder::Desc);
    }
}
