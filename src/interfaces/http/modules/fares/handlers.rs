//! Fare REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use super::dto::{
    CalculateFareRequest, CalculateFareResponse, FareCalculationResponse, FareHistoryResponse,
    FarePreviewRequest, FareQuoteResponse, HistoryQuery,
};
use crate::application::{CalculateFare, FareService};
use crate::domain::{CalculationFilter, SortOrder};
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ClientInfo, ValidatedJson};
use crate::shared::PaginationParams;

#[derive(Clone)]
pub struct FareState {
    pub service: Arc<FareService>,
    /// Used when a request omits `vehicle_type`
    pub default_vehicle_type: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/fares/calculate",
    tag = "Fares",
    request_body = CalculateFareRequest,
    responses(
        (status = 200, description = "Fare calculated and stored", body = ApiResponse<CalculateFareResponse>),
        (status = 400, description = "Invalid distance or unknown vehicle type"),
        (status = 422, description = "Pricing tiers cannot price the trip")
    )
)]
pub async fn calculate_fare(
    State(state): State<FareState>,
    client: ClientInfo,
    ValidatedJson(req): ValidatedJson<CalculateFareRequest>,
) -> Result<Json<ApiResponse<CalculateFareResponse>>, ApiError> {
    if let Some(ref location) = req.location {
        debug!(lat = location.lat, lng = location.lng, "Pickup location");
    }

    let result = state
        .service
        .calculate(CalculateFare {
            vehicle_type: req.vehicle_type.unwrap_or(state.default_vehicle_type),
            distance_km: req.distance,
            client_id: req.client_id,
            client_ip: client.ip,
            user_agent: client.user_agent,
        })
        .await
        .map_err(domain_error)?;

    let currency = state.service.currency();
    Ok(Json(ApiResponse::success(CalculateFareResponse {
        calculation_id: result.record.id,
        client_id: result.record.client_id,
        created_at: result.record.created_at,
        fare: FareQuoteResponse::new(result.quote, currency),
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/fares/preview",
    tag = "Fares",
    request_body = FarePreviewRequest,
    responses(
        (status = 200, description = "Fare quote, nothing stored", body = ApiResponse<FareQuoteResponse>),
        (status = 400, description = "Invalid distance or unknown vehicle type"),
        (status = 422, description = "Pricing tiers cannot price the trip")
    )
)]
pub async fn preview_fare(
    State(state): State<FareState>,
    ValidatedJson(req): ValidatedJson<FarePreviewRequest>,
) -> Result<Json<ApiResponse<FareQuoteResponse>>, ApiError> {
    let vehicle_type = req.vehicle_type.unwrap_or(state.default_vehicle_type);
    let quote = state
        .service
        .quote(&vehicle_type, req.distance)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(FareQuoteResponse::new(
        quote,
        state.service.currency(),
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/fares/history",
    tag = "Fares",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Calculation history", body = ApiResponse<FareHistoryResponse>),
        (status = 400, description = "Invalid filter")
    )
)]
pub async fn fare_history(
    State(state): State<FareState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<FareHistoryResponse>>, ApiError> {
    let filter = CalculationFilter {
        client_id: query.client_id,
        vehicle_type: query.vehicle_type,
        from: query.from,
        to: query.to,
        sort: query.sort.as_deref().map(SortOrder::parse).unwrap_or_default(),
    };
    let pagination = PaginationParams::normalize(query.page, query.limit);

    let history = state
        .service
        .history(filter, pagination)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(FareHistoryResponse {
        calculations: history.page.into(),
        summary: history.summary.map(Into::into),
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/fares/history/{id}",
    tag = "Fares",
    params(("id" = i32, Path, description = "Calculation ID")),
    responses(
        (status = 200, description = "Stored calculation", body = ApiResponse<FareCalculationResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_calculation(
    State(state): State<FareState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<FareCalculationResponse>>, ApiError> {
    let record = state.service.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(record.into())))
}
