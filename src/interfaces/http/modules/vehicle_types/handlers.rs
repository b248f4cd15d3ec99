//! Vehicle type REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateVehicleTypeRequest, ListVehicleTypesQuery, UpdateVehicleTypeRequest, VehicleTypeResponse,
};
use crate::application::VehicleService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct VehicleState {
    pub service: Arc<VehicleService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicle-types",
    tag = "Vehicle types",
    params(ListVehicleTypesQuery),
    responses(
        (status = 200, description = "Vehicle types ordered by name", body = ApiResponse<Vec<VehicleTypeResponse>>)
    )
)]
pub async fn list_vehicle_types(
    State(state): State<VehicleState>,
    Query(query): Query<ListVehicleTypesQuery>,
) -> Result<Json<ApiResponse<Vec<VehicleTypeResponse>>>, ApiError> {
    let vehicles = state
        .service
        .list(query.include_inactive)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        vehicles.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicle-types",
    tag = "Vehicle types",
    request_body = CreateVehicleTypeRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<VehicleTypeResponse>),
        (status = 400, description = "Invalid name"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_vehicle_type(
    State(state): State<VehicleState>,
    ValidatedJson(req): ValidatedJson<CreateVehicleTypeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleTypeResponse>>), ApiError> {
    let vehicle = state
        .service
        .create(req.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(vehicle.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/vehicle-types/{id}",
    tag = "Vehicle types",
    params(("id" = i32, Path, description = "Vehicle type ID")),
    request_body = UpdateVehicleTypeRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<VehicleTypeResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_vehicle_type(
    State(state): State<VehicleState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateVehicleTypeRequest>,
) -> Result<Json<ApiResponse<VehicleTypeResponse>>, ApiError> {
    let vehicle = state
        .service
        .update(id, req.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(vehicle.into())))
}
