//! Vehicle type entity

use chrono::{DateTime, Utc};

/// Category of vehicle selecting which tier set applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleType {
    pub id: i32,
    /// Identifier used by requests and pricing tiers, e.g. `motorcycle`
    pub name: String,
    pub display_name: String,
    /// Icon tag consumed by the UI
    pub icon: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
