//! Pricing tier administration
//!
//! Tiers are edited one at a time. Every write checks bounds, scale and
//! that the tier does not overlap another active tier of the same vehicle.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::{DomainError, DomainResult, PricingTier, RepositoryProvider};

/// Money is stored in cents.
const MONEY_SCALE: u32 = 2;
/// Distances are stored in meters.
const DISTANCE_SCALE: u32 = 3;
/// Largest accepted fare or rate.
const MAX_AMOUNT: i64 = 1_000_000_000;
/// Largest accepted tier bound, in km.
const MAX_BOUND_KM: i64 = 1_000_000;

#[derive(Debug, Clone)]
pub struct NewPricingTier {
    pub vehicle_type: String,
    pub min_distance_km: Decimal,
    pub max_distance_km: Option<Decimal>,
    pub base_fare: Decimal,
    pub per_km_rate: Decimal,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct PricingTierChanges {
    pub min_distance_km: Option<Decimal>,
    /// `Some(None)` makes the tier unbounded
    pub max_distance_km: Option<Option<Decimal>>,
    pub base_fare: Option<Decimal>,
    pub per_km_rate: Option<Decimal>,
    pub is_active: Option<bool>,
}

pub struct PricingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PricingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Tiers ordered by vehicle type, then lower bound.
    pub async fn list(
        &self,
        vehicle_type: Option<&str>,
        include_inactive: bool,
    ) -> DomainResult<Vec<PricingTier>> {
        let tiers = self.repos.pricing_tiers().find_all(include_inactive).await?;
        Ok(match vehicle_type {
            Some(vt) => tiers.into_iter().filter(|t| t.vehicle_type == vt).collect(),
            None => tiers,
        })
    }

    pub async fn get(&self, id: i32) -> DomainResult<PricingTier> {
        self.repos
            .pricing_tiers()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("PricingTier", "id", id))
    }

    pub async fn create(&self, new: NewPricingTier) -> DomainResult<PricingTier> {
        if self
            .repos
            .vehicle_types()
            .find_by_name(&new.vehicle_type)
            .await?
            .is_none()
        {
            return Err(DomainError::Validation("unknown vehicle type".to_string()));
        }

        let now = Utc::now();
        let tier = PricingTier {
            id: 0,
            vehicle_type: new.vehicle_type,
            min_distance_km: new.min_distance_km,
            max_distance_km: new.max_distance_km,
            base_fare: new.base_fare,
            per_km_rate: new.per_km_rate,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        validate_tier(&tier)?;
        self.ensure_no_overlap(&tier).await?;

        let saved = self.repos.pricing_tiers().save(tier).await?;
        info!(
            tier_id = saved.id,
            vehicle_type = %saved.vehicle_type,
            range = %saved.range_label(),
            "Pricing tier created"
        );
        Ok(saved)
    }

    pub async fn update(&self, id: i32, changes: PricingTierChanges) -> DomainResult<PricingTier> {
        let mut tier = self.get(id).await?;

        if let Some(min) = changes.min_distance_km {
            tier.min_distance_km = min;
        }
        if let Some(max) = changes.max_distance_km {
            tier.max_distance_km = max;
        }
        if let Some(base_fare) = changes.base_fare {
            tier.base_fare = base_fare;
        }
        if let Some(per_km_rate) = changes.per_km_rate {
            tier.per_km_rate = per_km_rate;
        }
        if let Some(is_active) = changes.is_active {
            tier.is_active = is_active;
        }
        tier.updated_at = Utc::now();

        validate_tier(&tier)?;
        self.ensure_no_overlap(&tier).await?;

        let saved = self.repos.pricing_tiers().update(tier).await?;
        info!(tier_id = saved.id, range = %saved.range_label(), "Pricing tier updated");
        Ok(saved)
    }

    /// Soft delete: the tier stays stored but no longer prices trips.
    pub async fn deactivate(&self, id: i32) -> DomainResult<PricingTier> {
        let mut tier = self.get(id).await?;
        tier.is_active = false;
        tier.updated_at = Utc::now();

        let saved = self.repos.pricing_tiers().update(tier).await?;
        info!(tier_id = saved.id, "Pricing tier deactivated");
        Ok(saved)
    }

    async fn ensure_no_overlap(&self, tier: &PricingTier) -> DomainResult<()> {
        if !tier.is_active {
            return Ok(());
        }

        let siblings = self
            .repos
            .pricing_tiers()
            .find_active_for_vehicle(&tier.vehicle_type)
            .await?;

        match siblings
            .iter()
            .find(|other| other.id != tier.id && tier.overlaps(other))
        {
            Some(other) => Err(DomainError::Conflict(format!(
                "pricing tier {} overlaps tier {} ({}) for {}",
                tier.range_label(),
                other.id,
                other.range_label(),
                tier.vehicle_type
            ))),
            None => Ok(()),
        }
    }
}

fn validate_tier(tier: &PricingTier) -> DomainResult<()> {
    if tier.min_distance_km < Decimal::ZERO {
        return Err(DomainError::Validation(
            "min_distance_km must not be negative".to_string(),
        ));
    }
    if let Some(max) = tier.max_distance_km {
        if max <= tier.min_distance_km {
            return Err(DomainError::Validation(
                "max_distance_km must be greater than min_distance_km".to_string(),
            ));
        }
    }
    if tier.base_fare < Decimal::ZERO {
        return Err(DomainError::Validation("base_fare must not be negative".to_string()));
    }
    if tier.per_km_rate < Decimal::ZERO {
        return Err(DomainError::Validation(
            "per_km_rate must not be negative".to_string(),
        ));
    }

    check_upper("min_distance_km", tier.min_distance_km, MAX_BOUND_KM)?;
    if let Some(max) = tier.max_distance_km {
        check_upper("max_distance_km", max, MAX_BOUND_KM)?;
    }
    check_upper("base_fare", tier.base_fare, MAX_AMOUNT)?;
    check_upper("per_km_rate", tier.per_km_rate, MAX_AMOUNT)?;

    check_scale("min_distance_km", tier.min_distance_km, DISTANCE_SCALE)?;
    if let Some(max) = tier.max_distance_km {
        check_scale("max_distance_km", max, DISTANCE_SCALE)?;
    }
    check_scale("base_fare", tier.base_fare, MONEY_SCALE)?;
    check_scale("per_km_rate", tier.per_km_rate, MONEY_SCALE)
}

fn check_upper(field: &str, value: Decimal, limit: i64) -> DomainResult<()> {
    if value > Decimal::from(limit) {
        return Err(DomainError::Validation(format!(
            "{} must not exceed {}",
            field, limit
        )));
    }
    Ok(())
}

fn check_scale(field: &str, value: Decimal, max_scale: u32) -> DomainResult<()> {
    if value.normalize().scale() > max_scale {
        return Err(DomainError::Validation(format!(
            "{} allows at most {} decimal places",
            field, max_scale
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn service() -> PricingService {
        PricingService::new(Arc::new(InMemoryRepositoryProvider::seeded()))
    }

    fn new_tier(vehicle: &str, min: &str, max: Option<&str>) -> NewPricingTier {
        NewPricingTier {
            vehicle_type: vehicle.into(),
            min_distance_km: d(min),
            max_distance_km: max.map(d),
            base_fare: d("0"),
            per_km_rate: d("15"),
        }
    }

    #[tokio::test]
    async fn test_list_is_ordered_and_filterable() {
        let svc = service();
        let all = svc.list(None, false).await.unwrap();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].vehicle_type, "car");
        assert_eq!(all[0].min_distance_km, d("0"));
        assert_eq!(all[2].max_distance_km, None);

        let motorcycle = svc.list(Some("motorcycle"), false).await.unwrap();
        assert_eq!(motorcycle.len(), 3);
        assert!(motorcycle.iter().all(|t| t.vehicle_type == "motorcycle"));
    }

    #[tokio::test]
    async fn test_create_rejects_overlap() {
        let svc = service();
        let err = svc.create(new_tier("car", "5", Some("10"))).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_after_freeing_range() {
        let svc = service();
        let car = svc.list(Some("car"), false).await.unwrap();
        let open_ended = car.iter().find(|t| t.max_distance_km.is_none()).unwrap();
        svc.deactivate(open_ended.id).await.unwrap();

        let created = svc.create(new_tier("car", "8", Some("20"))).await.unwrap();
        assert!(created.id > 0);
        assert!(created.is_active);
        assert_eq!(created.range_label(), "8-20km");
    }

    #[tokio::test]
    async fn test_create_validates_fields() {
        let svc = service();
        let cases = [
            new_tier("car", "-1", Some("2")),
            new_tier("car", "30", Some("20")),
            new_tier("car", "30.0005", None),
            NewPricingTier {
                base_fare: d("1.005"),
                ..new_tier("car", "30", None)
            },
            NewPricingTier {
                per_km_rate: d("-1"),
                ..new_tier("car", "30", None)
            },
            new_tier("spaceship", "0", None),
        ];
        for case in cases {
            assert!(
                matches!(svc.create(case.clone()).await, Err(DomainError::Validation(_))),
                "expected validation error for {:?}",
                case
            );
        }
    }

    #[tokio::test]
    async fn test_oversized_amounts_are_rejected() {
        let svc = service();
        let tier = svc.list(Some("car"), false).await.unwrap()[0].clone();

        let err = svc
            .update(
                tier.id,
                PricingTierChanges {
                    base_fare: Some(d("1000000000000000000000000000")),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = svc
            .create(NewPricingTier {
                per_km_rate: d("1000000001"),
                ..new_tier("car", "30", None)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = svc
            .create(new_tier("car", "30", Some("2000000")))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let unchanged = svc.get(tier.id).await.unwrap();
        assert_eq!(unchanged.base_fare, tier.base_fare);
    }

    #[tokio::test]
    async fn test_update_excludes_itself_from_overlap_check() {
        let svc = service();
        let car = svc.list(Some("car"), false).await.unwrap();
        let middle = car.iter().find(|t| t.min_distance_km == d("2")).unwrap();

        let updated = svc
            .update(
                middle.id,
                PricingTierChanges {
                    per_km_rate: Some(d("11.50")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.per_km_rate, d("11.50"));

        let err = svc
            .update(
                middle.id,
                PricingTierChanges {
                    max_distance_km: Some(Some(d("9"))),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_deactivate_is_soft() {
        let svc = service();
        let tier = svc.list(Some("motorcycle"), false).await.unwrap()[0].clone();

        let deleted = svc.deactivate(tier.id).await.unwrap();
        assert!(!deleted.is_active);

        assert_eq!(svc.list(Some("motorcycle"), false).await.unwrap().len(), 2);
        assert_eq!(svc.list(Some("motorcycle"), true).await.unwrap().len(), 3);
        assert!(!svc.get(tier.id).await.unwrap().is_active);
    }

    #[tokio::test]
    async fn test_unknown_tier() {
        let svc = service();
        assert!(matches!(svc.get(999).await, Err(DomainError::NotFound { .. })));
        assert!(matches!(
            svc.deactivate(999).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
