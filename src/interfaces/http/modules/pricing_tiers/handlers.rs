//! Pricing tier REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreatePricingTierRequest, ListPricingTiersQuery, PricingTierResponse, UpdatePricingTierRequest,
};
use crate::application::PricingService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct PricingState {
    pub service: Arc<PricingService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/pricing-tiers",
    tag = "Pricing tiers",
    params(ListPricingTiersQuery),
    responses(
        (status = 200, description = "Tiers ordered by vehicle type and lower bound", body = ApiResponse<Vec<PricingTierResponse>>)
    )
)]
pub async fn list_pricing_tiers(
    State(state): State<PricingState>,
    Query(query): Query<ListPricingTiersQuery>,
) -> Result<Json<ApiResponse<Vec<PricingTierResponse>>>, ApiError> {
    let tiers = state
        .service
        .list(query.vehicle_type.as_deref(), query.include_inactive)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        tiers.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/pricing-tiers/{id}",
    tag = "Pricing tiers",
    params(("id" = i32, Path, description = "Tier ID")),
    responses(
        (status = 200, description = "Tier details", body = ApiResponse<PricingTierResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_pricing_tier(
    State(state): State<PricingState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PricingTierResponse>>, ApiError> {
    let tier = state.service.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(tier.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/pricing-tiers",
    tag = "Pricing tiers",
    request_body = CreatePricingTierRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<PricingTierResponse>),
        (status = 400, description = "Invalid bounds or amounts"),
        (status = 409, description = "Overlaps an active tier")
    )
)]
pub async fn create_pricing_tier(
    State(state): State<PricingState>,
    ValidatedJson(req): ValidatedJson<CreatePricingTierRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PricingTierResponse>>), ApiError> {
    let tier = state
        .service
        .create(req.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(tier.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/pricing-tiers/{id}",
    tag = "Pricing tiers",
    params(("id" = i32, Path, description = "Tier ID")),
    request_body = UpdatePricingTierRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<PricingTierResponse>),
        (status = 400, description = "Invalid bounds or amounts"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Overlaps an active tier")
    )
)]
pub async fn update_pricing_tier(
    State(state): State<PricingState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdatePricingTierRequest>,
) -> Result<Json<ApiResponse<PricingTierResponse>>, ApiError> {
    let tier = state
        .service
        .update(id, req.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(tier.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/pricing-tiers/{id}",
    tag = "Pricing tiers",
    params(("id" = i32, Path, description = "Tier ID")),
    responses(
        (status = 200, description = "Deactivated; the tier is kept but no longer prices trips", body = ApiResponse<PricingTierResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_pricing_tier(
    State(state): State<PricingState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PricingTierResponse>>, ApiError> {
    let tier = state.service.deactivate(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(tier.into())))
}
