//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, PaginatedResponse};
use super::modules::fares::{self, FareState};
use super::modules::health::{self, HealthState};
use super::modules::metrics::{self, http_metrics_middleware, MetricsState};
use super::modules::pricing_tiers::{self, PricingState};
use super::modules::request_id::request_id_middleware;
use super::modules::usage::{self, UsageState};
use super::modules::vehicle_types::{self, VehicleState};
use crate::application::{FareService, PricingService, UsageService, VehicleService};

/// Services behind the REST API.
#[derive(Clone)]
pub struct ApiServices {
    pub fares: Arc<FareService>,
    pub pricing: Arc<PricingService>,
    pub vehicles: Arc<VehicleService>,
    pub usage: Arc<UsageService>,
    /// Vehicle type assumed when a fare request names none
    pub default_vehicle_type: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Fares
        fares::calculate_fare,
        fares::preview_fare,
        fares::fare_history,
        fares::get_calculation,
        // Pricing tiers
        pricing_tiers::list_pricing_tiers,
        pricing_tiers::get_pricing_tier,
        pricing_tiers::create_pricing_tier,
        pricing_tiers::update_pricing_tier,
        pricing_tiers::delete_pricing_tier,
        // Vehicle types
        vehicle_types::list_vehicle_types,
        vehicle_types::create_vehicle_type,
        vehicle_types::update_vehicle_type,
        // Usage
        usage::usage_report,
    ),
    components(schemas(
        health::HealthResponse,
        health::ComponentHealth,
        fares::Location,
        fares::CalculateFareRequest,
        fares::FarePreviewRequest,
        fares::LineItemResponse,
        fares::AppliedTierResponse,
        fares::FareQuoteResponse,
        fares::CalculateFareResponse,
        fares::FareCalculationResponse,
        fares::CalculationSummaryResponse,
        fares::FareHistoryResponse,
        PaginatedResponse<fares::FareCalculationResponse>,
        pricing_tiers::PricingTierResponse,
        pricing_tiers::CreatePricingTierRequest,
        pricing_tiers::UpdatePricingTierRequest,
        vehicle_types::VehicleTypeResponse,
        vehicle_types::CreateVehicleTypeRequest,
        vehicle_types::UpdateVehicleTypeRequest,
        usage::UsageReportResponse,
        usage::UsageOverviewResponse,
        usage::PeriodStatsResponse,
        usage::VehicleTypeCountResponse,
        usage::DailyStatResponse,
        usage::HourlyStatResponse,
    )),
    tags(
        (name = "Health", description = "Liveness and database status"),
        (name = "Fares", description = "Fare calculation and history"),
        (name = "Pricing tiers", description = "Distance-based fare schedule administration"),
        (name = "Vehicle types", description = "Vehicle type administration"),
        (name = "Usage", description = "Usage metrics over the calculation history"),
    ),
    info(
        title = "Taxi Fare Service API",
        description = "Tiered taxi fare calculation with pricing administration and usage metrics",
    )
)]
pub struct ApiDoc;

async fn route_not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("route not found")),
    )
}

/// Create the full HTTP router
pub fn create_api_router(services: ApiServices, health: HealthState, metrics: MetricsState) -> Router {
    let fare_routes = Router::new()
        .route("/calculate", post(fares::calculate_fare))
        .route("/preview", post(fares::preview_fare))
        .route("/history", get(fares::fare_history))
        .route("/history/{id}", get(fares::get_calculation))
        .with_state(FareState {
            service: services.fares,
            default_vehicle_type: services.default_vehicle_type,
        });

    let pricing_tier_routes = Router::new()
        .route(
            "/",
            get(pricing_tiers::list_pricing_tiers).post(pricing_tiers::create_pricing_tier),
        )
        .route(
            "/{id}",
            get(pricing_tiers::get_pricing_tier)
                .put(pricing_tiers::update_pricing_tier)
                .delete(pricing_tiers::delete_pricing_tier),
        )
        .with_state(PricingState {
            service: services.pricing,
        });

    let vehicle_type_routes = Router::new()
        .route(
            "/",
            get(vehicle_types::list_vehicle_types).post(vehicle_types::create_vehicle_type),
        )
        .route(
            "/{id}",
            axum::routing::put(vehicle_types::update_vehicle_type),
        )
        .with_state(VehicleState {
            service: services.vehicles,
        });

    let usage_routes = Router::new()
        .route("/", get(usage::usage_report))
        .with_state(UsageState {
            service: services.usage,
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health);

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api/v1/fares", fare_routes)
        .nest("/api/v1/pricing-tiers", pricing_tier_routes)
        .nest("/api/v1/vehicle-types", vehicle_type_routes)
        .nest("/api/v1/usage", usage_routes)
        .fallback(route_not_found)
        // Middleware
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
