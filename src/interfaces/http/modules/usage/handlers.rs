//! Usage metrics handler

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use super::dto::{UsageQuery, UsageReportResponse};
use crate::application::UsageService;
use crate::domain::UsagePeriod;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse};

#[derive(Clone)]
pub struct UsageState {
    pub service: Arc<UsageService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/usage",
    tag = "Usage",
    params(UsageQuery),
    responses(
        (status = 200, description = "Usage report", body = ApiResponse<UsageReportResponse>)
    )
)]
pub async fn usage_report(
    State(state): State<UsageState>,
    Query(query): Query<UsageQuery>,
) -> Result<Json<ApiResponse<UsageReportResponse>>, ApiError> {
    let period = query
        .period
        .as_deref()
        .map(UsagePeriod::parse)
        .unwrap_or_default();
    let report = state.service.report(period).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(report.into())))
}
