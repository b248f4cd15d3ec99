pub mod fares;
pub mod health;
pub mod metrics;
pub mod pricing_tiers;
pub mod request_id;
pub mod usage;
pub mod vehicle_types;
