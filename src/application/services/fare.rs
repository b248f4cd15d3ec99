//! Fare calculation service: quote, calculate + persist, history

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::{
    CalculationFilter, CalculationSummary, DomainError, DomainResult, FareCalculationRecord,
    FareCalculator, FareQuote, RepositoryProvider, VehicleType, ANONYMOUS_CLIENT,
};
use crate::shared::{PaginatedResult, PaginationParams};

const UNKNOWN_VEHICLE_LABEL: &str = "unknown";

/// Input of a persisted calculation.
#[derive(Debug, Clone)]
pub struct CalculateFare {
    pub vehicle_type: String,
    pub distance_km: Decimal,
    pub client_id: Option<String>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
}

/// A stored calculation together with the quote it was built from.
#[derive(Debug, Clone)]
pub struct FareCalculation {
    pub record: FareCalculationRecord,
    pub quote: FareQuote,
}

#[derive(Debug)]
pub struct FareHistory {
    pub page: PaginatedResult<FareCalculationRecord>,
    /// Over every record matching the filter, not only the current page
    pub summary: Option<CalculationSummary>,
}

pub struct FareService {
    repos: Arc<dyn RepositoryProvider>,
    calculator: FareCalculator,
    currency: String,
}

impl FareService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        calculator: FareCalculator,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            repos,
            calculator,
            currency: currency.into(),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Price a trip without storing anything.
    pub async fn quote(&self, vehicle_type: &str, distance_km: Decimal) -> DomainResult<FareQuote> {
        let distance = self.calculator.validate_distance(distance_km)?;
        let vehicle = self.resolve_vehicle(vehicle_type).await?;

        let tiers = self
            .repos
            .pricing_tiers()
            .find_active_for_vehicle(&vehicle.name)
            .await?;

        self.calculator.calculate(&vehicle, distance, &tiers)
    }

    /// Price a trip and append it to the calculation history.
    pub async fn calculate(&self, request: CalculateFare) -> DomainResult<FareCalculation> {
        let quote = match self.quote(&request.vehicle_type, request.distance_km).await {
            Ok(quote) => quote,
            Err(e) => {
                let status = match e {
                    DomainError::Validation(_) => "rejected",
                    _ => "failed",
                };
                let vehicle_label = self.rejection_label(&request.vehicle_type).await;
                metrics::counter!("fare_calculations_total", "vehicle_type" => vehicle_label, "status" => status)
                    .increment(1);
                warn!(
                    vehicle_type = %request.vehicle_type,
                    distance_km = %request.distance_km,
                    error = %e,
                    "Fare calculation rejected"
                );
                return Err(e);
            }
        };

        let client_id = request
            .client_id
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| ANONYMOUS_CLIENT.to_string());

        let record = FareCalculationRecord {
            id: 0,
            distance_km: quote.distance_km,
            vehicle_type: quote.vehicle_type.clone(),
            total_fare: quote.total,
            breakdown: quote.breakdown_text(&self.currency),
            line_items: quote.line_items.clone(),
            client_id,
            client_ip: request.client_ip,
            user_agent: request.user_agent,
            created_at: Utc::now(),
        };

        let record = match self.repos.calculations().save(record).await {
            Ok(record) => record,
            Err(e) => {
                metrics::counter!("fare_calculations_total", "vehicle_type" => quote.vehicle_type.clone(), "status" => "failed")
                    .increment(1);
                return Err(e);
            }
        };

        metrics::counter!("fare_calculations_total", "vehicle_type" => quote.vehicle_type.clone(), "status" => "success")
            .increment(1);
        metrics::histogram!("fare_amount", "vehicle_type" => quote.vehicle_type.clone())
            .record(quote.total.to_f64().unwrap_or_default());

        info!(
            calculation_id = record.id,
            vehicle_type = %record.vehicle_type,
            distance_km = %record.distance_km,
            client_id = %record.client_id,
            "Fare calculated: {}",
            quote.format_total(&self.currency)
        );

        Ok(FareCalculation { record, quote })
    }

    pub async fn history(
        &self,
        filter: CalculationFilter,
        pagination: PaginationParams,
    ) -> DomainResult<FareHistory> {
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            if from > to {
                return Err(DomainError::Validation(
                    "'from' must not be after 'to'".to_string(),
                ));
            }
        }

        let calculations = self.repos.calculations();
        let page = calculations.find_page(&filter, pagination).await?;
        let summary = if page.total == 0 {
            None
        } else {
            CalculationSummary::from_records(&calculations.find_all(&filter).await?)
        };

        Ok(FareHistory { page, summary })
    }

    pub async fn get(&self, id: i32) -> DomainResult<FareCalculationRecord> {
        self.repos
            .calculations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("FareCalculation", "id", id))
    }

    async fn resolve_vehicle(&self, name: &str) -> DomainResult<VehicleType> {
        self.repos
            .vehicle_types()
            .find_by_name(name)
            .await?
            .filter(|v| v.is_active)
            .ok_or_else(|| DomainError::Validation("unknown vehicle type".to_string()))
    }

    /// Metric label for a failed request: the vehicle name when it is an
    /// active vehicle type, `unknown` otherwise so caller input never
    /// becomes a label value.
    async fn rejection_label(&self, requested: &str) -> String {
        match self.resolve_vehicle(requested).await {
            Ok(vehicle) => vehicle.name,
            Err(_) => UNKNOWN_VEHICLE_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn service() -> FareService {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::seeded());
        FareService::new(repos, FareCalculator::default(), "PHP")
    }

    fn request(vehicle: &str, distance: &str, client: Option<&str>) -> CalculateFare {
        CalculateFare {
            vehicle_type: vehicle.to_string(),
            distance_km: d(distance),
            client_id: client.map(String::from),
            client_ip: Some("127.0.0.1".into()),
            user_agent: None,
        }
    }

    #[tokio::test]
    async fn test_quote_uses_seeded_schedule() {
        let svc = service();
        assert_eq!(svc.quote("motorcycle", d("2")).await.unwrap().total, d("50.00"));
        assert_eq!(svc.quote("motorcycle", d("3")).await.unwrap().total, d("60.00"));
        assert_eq!(svc.quote("car", d("8")).await.unwrap().total, d("110.00"));
        assert_eq!(svc.quote("car", d("9")).await.unwrap().total, d("122.00"));
        assert_eq!(svc.quote("car", d("9.74")).await.unwrap().total, d("130.88"));
    }

    #[tokio::test]
    async fn test_quote_rejects_bad_input() {
        let svc = service();
        for distance in ["0", "-5", "1000.001"] {
            assert!(matches!(
                svc.quote("car", d(distance)).await,
                Err(DomainError::Validation(_))
            ));
        }
        let err = svc.quote("spaceship", d("5")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m == "unknown vehicle type"));
    }

    #[tokio::test]
    async fn test_quote_does_not_persist() {
        let svc = service();
        svc.quote("car", d("5")).await.unwrap();
        assert_eq!(svc.repos.calculations().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_calculate_persists_record() {
        let svc = service();
        let result = svc.calculate(request("car", "9.74", None)).await.unwrap();

        assert!(result.record.id > 0);
        assert_eq!(result.record.total_fare, d("130.88"));
        assert_eq!(result.record.client_id, ANONYMOUS_CLIENT);
        assert_eq!(result.record.line_items.len(), 3);
        assert!(result.record.breakdown.contains("Base fare (0-2km): 50.00 PHP"));

        let stored = svc.get(result.record.id).await.unwrap();
        assert_eq!(stored, result.record);
    }

    #[tokio::test]
    async fn test_failed_calculation_stores_nothing() {
        let svc = service();
        assert!(svc.calculate(request("spaceship", "5", None)).await.is_err());
        assert!(svc.calculate(request("car", "0", None)).await.is_err());
        assert_eq!(svc.repos.calculations().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_history_filters_and_summarizes() {
        let svc = service();
        svc.calculate(request("car", "3", Some("alice"))).await.unwrap();
        svc.calculate(request("car", "9", Some("alice"))).await.unwrap();
        svc.calculate(request("motorcycle", "1", Some("bob"))).await.unwrap();

        let filter = CalculationFilter {
            client_id: Some("alice".into()),
            ..Default::default()
        };
        let history = svc
            .history(filter, PaginationParams::normalize(Some(1), Some(1)))
            .await
            .unwrap();

        assert_eq!(history.page.total, 2);
        assert_eq!(history.page.items.len(), 1);
        assert_eq!(history.page.total_pages, 2);
        // newest first
        assert_eq!(history.page.items[0].total_fare, d("122.00"));

        let summary = history.summary.unwrap();
        assert_eq!(summary.total_calculations, 2);
        assert_eq!(summary.average_fare, d("91.00"));
        assert_eq!(summary.min_fare, d("60.00"));
        assert_eq!(summary.max_fare, d("122.00"));
        assert_eq!(summary.total_distance_km, d("12"));
    }

    #[tokio::test]
    async fn test_history_without_matches_has_no_summary() {
        let svc = service();
        let filter = CalculationFilter {
            vehicle_type: Some("car".into()),
            ..Default::default()
        };
        let history = svc
            .history(filter, PaginationParams::normalize(None, None))
            .await
            .unwrap();
        assert!(history.page.items.is_empty());
        assert!(history.summary.is_none());
    }

    #[tokio::test]
    async fn test_history_rejects_inverted_range() {
        let svc = service();
        let now = Utc::now();
        let filter = CalculationFilter {
            from: Some(now),
            to: Some(now - chrono::Duration::hours(1)),
            ..Default::default()
        };
        let result = svc.history(filter, PaginationParams::normalize(None, None)).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_rejections_keep_known_vehicle_label() {
        let svc = service();

        let err = svc.calculate(request("car", "0", None)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(svc.rejection_label("car").await, "car");

        assert_eq!(svc.rejection_label("spaceship").await, UNKNOWN_VEHICLE_LABEL);
    }

    #[tokio::test]
    async fn test_get_unknown_record() {
        let svc = service();
        assert!(matches!(svc.get(42).await, Err(DomainError::NotFound { .. })));
    }
}
