//! Tiered fare calculation
//!
//! Every tier the distance enters contributes its base fare plus the
//! per-km rate for the distance travelled inside it. With the seeded
//! schedule (0-2 km: 50.00 flat, 2-8 km: 10.00/km, 8 km+: 12.00/km):
//!
//! - 0.5 km → 50.00 (minimum fare)
//! - 3 km   → 50.00 + 1 × 10.00 = 60.00
//! - 9.74 km → 50.00 + 6 × 10.00 + 1.74 × 12.00 = 130.88

use rust_decimal::Decimal;

use super::model::{
    format_money, round_distance, round_money, AppliedTier, FareQuote, LineItem, PricingTier,
};
use crate::domain::vehicle::VehicleType;
use crate::domain::{DomainError, DomainResult};

/// Below this distance the first line reads as a minimum fare.
const MINIMUM_FARE_DISTANCE_KM: Decimal = Decimal::ONE;

/// Default upper bound for a single trip, in km.
pub const DEFAULT_MAX_DISTANCE_KM: i64 = 1000;

/// Stateless fare calculator. Holds only the accepted distance bound.
#[derive(Debug, Clone)]
pub struct FareCalculator {
    max_distance_km: Decimal,
}

impl Default for FareCalculator {
    fn default() -> Self {
        Self::new(Decimal::from(DEFAULT_MAX_DISTANCE_KM))
    }
}

impl FareCalculator {
    pub fn new(max_distance_km: Decimal) -> Self {
        Self { max_distance_km }
    }

    pub fn max_distance_km(&self) -> Decimal {
        self.max_distance_km
    }

    /// Check the distance against `0 < distance <= max` and normalize it to meters.
    pub fn validate_distance(&self, distance_km: Decimal) -> DomainResult<Decimal> {
        if distance_km <= Decimal::ZERO {
            return Err(DomainError::Validation(
                "distance must be positive".to_string(),
            ));
        }
        if distance_km > self.max_distance_km {
            return Err(DomainError::Validation(format!(
                "distance must not exceed {} km",
                self.max_distance_km.normalize()
            )));
        }
        let normalized = round_distance(distance_km);
        if normalized <= Decimal::ZERO {
            return Err(DomainError::Validation(
                "distance must be positive".to_string(),
            ));
        }
        Ok(normalized)
    }

    /// Price `distance_km` for `vehicle` against a snapshot of its tiers.
    ///
    /// Tiers of other vehicle types and inactive tiers are ignored. The
    /// remaining schedule must start at 0 and be contiguous.
    pub fn calculate(
        &self,
        vehicle: &VehicleType,
        distance_km: Decimal,
        tiers: &[PricingTier],
    ) -> DomainResult<FareQuote> {
        let distance = self.validate_distance(distance_km)?;

        if !vehicle.is_active {
            return Err(DomainError::Validation("unknown vehicle type".to_string()));
        }

        let schedule = schedule_for(&vehicle.name, tiers)?;

        let covered = match schedule.last() {
            Some(last) => last.max_distance_km.map_or(true, |max| distance <= max),
            None => false,
        };
        if !covered {
            return Err(DomainError::Configuration(
                "no pricing tier for distance".to_string(),
            ));
        }

        let mut line_items = Vec::new();
        let mut applied_tiers = Vec::new();

        for (index, tier) in schedule.iter().enumerate() {
            let first = index == 0;
            if !first && distance <= tier.min_distance_km {
                break;
            }

            let upper = tier
                .max_distance_km
                .map_or(distance, |max| distance.min(max));
            let km_in_tier = (upper - tier.min_distance_km).max(Decimal::ZERO);
            let amount = round_money(tier.base_fare + km_in_tier * tier.per_km_rate);

            line_items.push(LineItem {
                description: describe(tier, first, distance, km_in_tier),
                amount,
            });
            applied_tiers.push(AppliedTier {
                tier_id: tier.id,
                range: tier.range_label(),
                per_km_rate: tier.per_km_rate,
                distance_km: km_in_tier,
                amount,
            });
        }

        let total = line_items.iter().map(|item| item.amount).sum();

        Ok(FareQuote {
            vehicle_type: vehicle.name.clone(),
            distance_km: distance,
            total,
            line_items,
            applied_tiers,
        })
    }
}

/// Active tiers of one vehicle, sorted and checked for integrity.
fn schedule_for<'a>(vehicle_type: &str, tiers: &'a [PricingTier]) -> DomainResult<Vec<&'a PricingTier>> {
    let mut schedule: Vec<&PricingTier> = tiers
        .iter()
        .filter(|t| t.is_active && t.vehicle_type == vehicle_type)
        .collect();
    schedule.sort_by(|a, b| a.min_distance_km.cmp(&b.min_distance_km));

    validate_schedule(&schedule)?;
    Ok(schedule)
}

/// Integrity rules for a sorted schedule: starts at 0, every bound is
/// increasing, consecutive tiers meet exactly, only the last may be unbounded.
pub fn validate_schedule(schedule: &[&PricingTier]) -> DomainResult<()> {
    let Some(first) = schedule.first() else {
        return Ok(());
    };

    if first.min_distance_km != Decimal::ZERO {
        return Err(DomainError::Configuration(format!(
            "pricing tiers for {} must start at 0 km, first tier starts at {} km",
            first.vehicle_type,
            first.min_distance_km.normalize()
        )));
    }

    for tier in schedule {
        if let Some(max) = tier.max_distance_km {
            if max <= tier.min_distance_km {
                return Err(DomainError::Configuration(format!(
                    "pricing tier {} has an empty range {}",
                    tier.id,
                    tier.range_label()
                )));
            }
        }
    }

    for pair in schedule.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        match current.max_distance_km {
            None => {
                return Err(DomainError::Configuration(format!(
                    "unbounded pricing tier {} is followed by tier {}",
                    current.id, next.id
                )));
            }
            Some(max) if max > next.min_distance_km => {
                return Err(DomainError::Configuration(format!(
                    "pricing tiers {} ({}) and {} ({}) overlap",
                    current.id,
                    current.range_label(),
                    next.id,
                    next.range_label()
                )));
            }
            Some(max) if max < next.min_distance_km => {
                return Err(DomainError::Configuration(format!(
                    "gap in pricing tiers between {} km and {} km",
                    max.normalize(),
                    next.min_distance_km.normalize()
                )));
            }
            Some(_) => {}
        }
    }

    Ok(())
}

fn describe(tier: &PricingTier, first: bool, distance: Decimal, km_in_tier: Decimal) -> String {
    if first && tier.per_km_rate.is_zero() {
        if distance < MINIMUM_FARE_DISTANCE_KM {
            return format!("Minimum fare (under {}km)", MINIMUM_FARE_DISTANCE_KM);
        }
        return format!("Base fare ({})", tier.range_label());
    }

    let charge = format!(
        "{:.2}km × {}",
        round_money(km_in_tier),
        format_money(tier.per_km_rate)
    );
    if first {
        format!("Base fare ({}) + {}", tier.range_label(), charge)
    } else {
        format!("Distance charge {} ({})", tier.range_label(), charge)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn vehicle(name: &str) -> VehicleType {
        VehicleType {
            id: 1,
            name: name.into(),
            display_name: name.into(),
            icon: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn tier(id: i32, vehicle: &str, min: &str, max: Option<&str>, base: &str, rate: &str) -> PricingTier {
        PricingTier {
            id,
            vehicle_type: vehicle.into(),
            min_distance_km: d(min),
            max_distance_km: max.map(d),
            base_fare: d(base),
            per_km_rate: d(rate),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// The seeded schedule.
    fn standard(vehicle: &str) -> Vec<PricingTier> {
        vec![
            tier(1, vehicle, "0", Some("2"), "50", "0"),
            tier(2, vehicle, "2", Some("8"), "0", "10"),
            tier(3, vehicle, "8", None, "0", "12"),
        ]
    }

    fn quote(distance: &str) -> FareQuote {
        FareCalculator::default()
            .calculate(&vehicle("car"), d(distance), &standard("car"))
            .unwrap()
    }

    fn assert_sum_invariant(q: &FareQuote) {
        let sum: Decimal = q.line_items.iter().map(|i| i.amount).sum();
        assert_eq!(sum, q.total, "line items must sum to total for {}", q.distance_km);
    }

    #[test]
    fn boundary_scenarios() {
        assert_eq!(quote("2").total, d("50.00"));
        assert_eq!(quote("3").total, d("60.00"));
        assert_eq!(quote("8").total, d("110.00"));
        assert_eq!(quote("9").total, d("122.00"));
        assert_eq!(quote("9.74").total, d("130.88"));
    }

    #[test]
    fn under_one_km_is_minimum_fare() {
        let q = quote("0.5");
        assert_eq!(q.total, d("50.00"));
        assert_eq!(q.line_items.len(), 1);
        assert_eq!(q.line_items[0].description, "Minimum fare (under 1km)");
    }

    #[test]
    fn one_to_two_km_is_base_fare_only() {
        for km in ["1", "1.25", "1.5", "1.999", "2"] {
            let q = quote(km);
            assert_eq!(q.total, d("50.00"), "distance {}", km);
            assert_eq!(q.line_items.len(), 1);
            assert_eq!(q.line_items[0].description, "Base fare (0-2km)");
        }
    }

    #[test]
    fn three_to_eight_km_has_two_items() {
        for km in ["3", "4.5", "5.55", "7.125", "8"] {
            let distance = d(km);
            let q = quote(km);
            let expected = round_money(d("50") + (distance - d("2")) * d("10"));
            assert_eq!(q.total, expected, "distance {}", km);
            assert_eq!(q.line_items.len(), 2);
            assert_eq!(q.line_items[0].amount, d("50.00"));
            assert_sum_invariant(&q);
        }
    }

    #[test]
    fn nine_km_and_above_has_three_items() {
        for km in ["9", "9.74", "12.3", "57.891", "1000"] {
            let distance = d(km);
            let q = quote(km);
            let expected = round_money(d("110") + (distance - d("8")) * d("12"));
            assert_eq!(q.total, expected, "distance {}", km);
            assert_eq!(q.line_items.len(), 3);
            assert_eq!(q.line_items[1].amount, d("60.00"));
            assert_sum_invariant(&q);
        }
    }

    #[test]
    fn gap_between_two_and_three_km_is_priced_continuously() {
        let q = quote("2.5");
        assert_eq!(q.total, d("55.00"));
        assert_eq!(q.line_items.len(), 2);
        assert_eq!(
            q.line_items[1].description,
            "Distance charge 2-8km (0.50km × 10.00)"
        );

        assert_eq!(quote("8.5").total, d("116.00"));
    }

    #[test]
    fn line_item_descriptions_for_long_trip() {
        let q = quote("9.74");
        let descriptions: Vec<_> = q.line_items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "Base fare (0-2km)",
                "Distance charge 2-8km (6.00km × 10.00)",
                "Distance charge 8km+ (1.74km × 12.00)",
            ]
        );
        assert_eq!(q.applied_tiers.len(), 3);
        assert_eq!(q.applied_tiers[2].tier_id, 3);
        assert_eq!(q.applied_tiers[2].distance_km, d("1.74"));
        assert_eq!(q.applied_tiers[2].amount, d("20.88"));
    }

    #[test]
    fn sum_invariant_holds_on_awkward_distances() {
        let calc = FareCalculator::default();
        let tiers = vec![
            tier(1, "car", "0", Some("1.333"), "45.5", "3.333"),
            tier(2, "car", "1.333", Some("7.777"), "1.11", "9.999"),
            tier(3, "car", "7.777", None, "0.01", "11.115"),
        ];
        for km in ["0.001", "1.333", "1.334", "5.005", "7.777", "7.778", "123.456", "999.999"] {
            let q = calc.calculate(&vehicle("car"), d(km), &tiers).unwrap();
            assert_sum_invariant(&q);
            assert!(q.total.scale() <= 2);
        }
    }

    #[test]
    fn calculation_is_idempotent() {
        assert_eq!(quote("9.74"), quote("9.74"));
        assert_eq!(quote("3.3"), quote("3.3"));
    }

    #[test]
    fn non_positive_distance_is_rejected() {
        let calc = FareCalculator::default();
        for km in ["0", "-5", "0.0001"] {
            let err = calc
                .calculate(&vehicle("car"), d(km), &standard("car"))
                .unwrap_err();
            assert!(
                matches!(err, DomainError::Validation(ref m) if m == "distance must be positive"),
                "distance {} gave {:?}",
                km,
                err
            );
        }
    }

    #[test]
    fn distance_above_bound_is_rejected() {
        let err = FareCalculator::default()
            .calculate(&vehicle("car"), d("1000.5"), &standard("car"))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m == "distance must not exceed 1000 km"));

        let err = FareCalculator::new(d("100"))
            .calculate(&vehicle("car"), d("101"), &standard("car"))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m == "distance must not exceed 100 km"));
    }

    #[test]
    fn inactive_vehicle_is_unknown() {
        let mut v = vehicle("car");
        v.is_active = false;
        let err = FareCalculator::default()
            .calculate(&v, d("5"), &standard("car"))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m == "unknown vehicle type"));
    }

    #[test]
    fn missing_tiers_are_a_configuration_error() {
        let err = FareCalculator::default()
            .calculate(&vehicle("car"), d("5"), &standard("motorcycle"))
            .unwrap_err();
        assert!(matches!(err, DomainError::Configuration(ref m) if m == "no pricing tier for distance"));
    }

    #[test]
    fn distance_past_bounded_schedule_is_a_configuration_error() {
        let tiers = vec![
            tier(1, "car", "0", Some("2"), "50", "0"),
            tier(2, "car", "2", Some("8"), "0", "10"),
        ];
        let calc = FareCalculator::default();
        assert_eq!(calc.calculate(&vehicle("car"), d("8"), &tiers).unwrap().total, d("110.00"));
        let err = calc.calculate(&vehicle("car"), d("8.001"), &tiers).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[test]
    fn inactive_tiers_are_ignored() {
        let mut tiers = standard("car");
        tiers.push(PricingTier {
            is_active: false,
            ..tier(9, "car", "1", Some("5"), "999", "999")
        });
        assert_eq!(
            FareCalculator::default()
                .calculate(&vehicle("car"), d("9.74"), &tiers)
                .unwrap()
                .total,
            d("130.88")
        );
    }

    #[test]
    fn unsorted_snapshot_is_sorted_before_pricing() {
        let mut tiers = standard("car");
        tiers.reverse();
        assert_eq!(
            FareCalculator::default()
                .calculate(&vehicle("car"), d("9"), &tiers)
                .unwrap()
                .total,
            d("122.00")
        );
    }

    #[test]
    fn overlapping_tiers_are_a_configuration_error() {
        let tiers = vec![
            tier(1, "car", "0", Some("3"), "50", "0"),
            tier(2, "car", "2", None, "0", "10"),
        ];
        let err = FareCalculator::default()
            .calculate(&vehicle("car"), d("1"), &tiers)
            .unwrap_err();
        assert!(matches!(err, DomainError::Configuration(ref m) if m.contains("overlap")));
    }

    #[test]
    fn gapped_tiers_are_a_configuration_error() {
        let tiers = vec![
            tier(1, "car", "0", Some("2"), "50", "0"),
            tier(2, "car", "3", None, "0", "10"),
        ];
        let err = FareCalculator::default()
            .calculate(&vehicle("car"), d("1"), &tiers)
            .unwrap_err();
        assert!(matches!(err, DomainError::Configuration(ref m) if m.contains("gap")));
    }

    #[test]
    fn schedule_must_start_at_zero() {
        let tiers = vec![tier(1, "car", "1", None, "50", "10")];
        let err = FareCalculator::default()
            .calculate(&vehicle("car"), d("5"), &tiers)
            .unwrap_err();
        assert!(matches!(err, DomainError::Configuration(ref m) if m.contains("must start at 0")));
    }

    #[test]
    fn first_tier_with_rate_charges_distance() {
        let tiers = vec![tier(1, "van", "0", None, "40", "15")];
        let q = FareCalculator::default()
            .calculate(&vehicle("van"), d("3"), &tiers)
            .unwrap();
        assert_eq!(q.total, d("85.00"));
        assert_eq!(q.line_items[0].description, "Base fare (0km+) + 3.00km × 15.00");
    }

    #[test]
    fn short_trip_on_rated_first_tier_shows_distance_charge() {
        let tiers = vec![tier(1, "van", "0", None, "40", "15")];
        let q = FareCalculator::default()
            .calculate(&vehicle("van"), d("0.5"), &tiers)
            .unwrap();
        assert_eq!(q.total, d("47.50"));
        assert_eq!(q.line_items[0].description, "Base fare (0km+) + 0.50km × 15.00");
    }

    #[test]
    fn distance_is_normalized_to_meters() {
        let q = quote("9.7404");
        assert_eq!(q.distance_km, d("9.740"));
        assert_eq!(q.total, d("130.88"));
    }
}
