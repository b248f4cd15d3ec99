//! Pricing tier and fare quote entities

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Round a money amount to cents (half away from zero).
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Normalize a distance to meter resolution (3 decimals, half away from zero).
pub fn round_distance(km: Decimal) -> Decimal {
    km.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
}

/// One row of a vehicle's fare schedule.
///
/// The first tier of a schedule covers `[0, max]`, every following tier
/// covers `(min, max]`. `max_distance_km = None` means unbounded.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTier {
    pub id: i32,
    pub vehicle_type: String,
    pub min_distance_km: Decimal,
    pub max_distance_km: Option<Decimal>,
    /// Flat charge applied once the distance enters this tier
    pub base_fare: Decimal,
    /// Charge per km travelled inside this tier
    pub per_km_rate: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PricingTier {
    /// Human-readable range, e.g. `2-8km` or `8km+`.
    pub fn range_label(&self) -> String {
        match self.max_distance_km {
            Some(max) => format!(
                "{}-{}km",
                self.min_distance_km.normalize(),
                max.normalize()
            ),
            None => format!("{}km+", self.min_distance_km.normalize()),
        }
    }

    /// Whether the half-open ranges `[min, max)` of two tiers intersect.
    pub fn overlaps(&self, other: &PricingTier) -> bool {
        let starts_before_other_ends = other
            .max_distance_km
            .map_or(true, |max| self.min_distance_km < max);
        let other_starts_before_self_ends = self
            .max_distance_km
            .map_or(true, |max| other.min_distance_km < max);
        starts_before_other_ends && other_starts_before_self_ends
    }
}

/// A named charge of a fare breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub amount: Decimal,
}

/// Which tier produced a line item and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedTier {
    pub tier_id: i32,
    pub range: String,
    pub per_km_rate: Decimal,
    /// Distance charged inside the tier
    pub distance_km: Decimal,
    pub amount: Decimal,
}

/// Result of pricing one trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareQuote {
    pub vehicle_type: String,
    pub distance_km: Decimal,
    pub total: Decimal,
    pub line_items: Vec<LineItem>,
    pub applied_tiers: Vec<AppliedTier>,
}

impl FareQuote {
    /// Multi-line breakdown, one charge per line, e.g.
    /// `Base fare (0-2km): 50.00 PHP`.
    pub fn breakdown_text(&self, currency: &str) -> String {
        self.line_items
            .iter()
            .map(|item| format!("{}: {} {}", item.description, format_money(item.amount), currency))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_total(&self, currency: &str) -> String {
        format!("{} {}", format_money(self.total), currency)
    }
}

/// Money with exactly two fractional digits.
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tier(min: &str, max: Option<&str>) -> PricingTier {
        PricingTier {
            id: 1,
            vehicle_type: "car".into(),
            min_distance_km: d(min),
            max_distance_km: max.map(d),
            base_fare: Decimal::ZERO,
            per_km_rate: d("10"),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn round_money_is_half_away_from_zero() {
        assert_eq!(round_money(d("1.005")), d("1.01"));
        assert_eq!(round_money(d("2.675")), d("2.68"));
        assert_eq!(round_money(d("1.004")), d("1.00"));
        assert_eq!(round_money(d("-1.005")), d("-1.01"));
    }

    #[test]
    fn round_distance_keeps_meters() {
        assert_eq!(round_distance(d("9.7449")), d("9.745"));
        assert_eq!(round_distance(d("9.74")), d("9.74"));
    }

    #[test]
    fn range_labels() {
        assert_eq!(tier("2", Some("8")).range_label(), "2-8km");
        assert_eq!(tier("0.5", Some("2.00")).range_label(), "0.5-2km");
        assert_eq!(tier("8", None).range_label(), "8km+");
    }

    #[test]
    fn adjacent_tiers_do_not_overlap() {
        assert!(!tier("0", Some("2")).overlaps(&tier("2", Some("8"))));
        assert!(!tier("8", None).overlaps(&tier("2", Some("8"))));
    }

    #[test]
    fn intersecting_tiers_overlap() {
        assert!(tier("0", Some("3")).overlaps(&tier("2", Some("8"))));
        assert!(tier("5", None).overlaps(&tier("2", Some("8"))));
        assert!(tier("10", None).overlaps(&tier("20", None)));
        assert!(tier("3", Some("4")).overlaps(&tier("2", Some("8"))));
    }

    #[test]
    fn breakdown_text_lists_every_item() {
        let quote = FareQuote {
            vehicle_type: "car".into(),
            distance_km: d("3"),
            total: d("60.00"),
            line_items: vec![
                LineItem { description: "Base fare (0-2km)".into(), amount: d("50") },
                LineItem { description: "Distance charge 2-8km (1.00km × 10.00)".into(), amount: d("10.00") },
            ],
            applied_tiers: vec![],
        };
        assert_eq!(
            quote.breakdown_text("PHP"),
            "Base fare (0-2km): 50.00 PHP\nDistance charge 2-8km (1.00km × 10.00): 10.00 PHP"
        );
        assert_eq!(quote.format_total("PHP"), "60.00 PHP");
    }
}
