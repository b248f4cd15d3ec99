//! Vehicle type DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{NewVehicleType, VehicleTypeChanges};
use crate::domain::VehicleType;

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleTypeResponse {
    pub id: i32,
    pub name: String,
    pub display_name: String,
    pub icon: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<VehicleType> for VehicleTypeResponse {
    fn from(v: VehicleType) -> Self {
        Self {
            id: v.id,
            name: v.name,
            display_name: v.display_name,
            icon: v.icon,
            is_active: v.is_active,
            created_at: v.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicleTypeRequest {
    /// Lowercase identifier, e.g. `tricycle`
    #[validate(length(min = 1, max = 50, message = "name must be 1-50 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "display_name must be 1-100 characters"))]
    pub display_name: String,
    #[validate(length(max = 50, message = "icon must be at most 50 characters"))]
    pub icon: Option<String>,
}

impl From<CreateVehicleTypeRequest> for NewVehicleType {
    fn from(req: CreateVehicleTypeRequest) -> Self {
        Self {
            name: req.name,
            display_name: req.display_name,
            icon: req.icon,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateVehicleTypeRequest {
    #[validate(length(min = 1, max = 100, message = "display_name must be 1-100 characters"))]
    pub display_name: Option<String>,
    #[validate(length(max = 50, message = "icon must be at most 50 characters"))]
    pub icon: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateVehicleTypeRequest> for VehicleTypeChanges {
    fn from(req: UpdateVehicleTypeRequest) -> Self {
        Self {
            display_name: req.display_name,
            icon: req.icon,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListVehicleTypesQuery {
    #[serde(default)]
    pub include_inactive: bool,
}
