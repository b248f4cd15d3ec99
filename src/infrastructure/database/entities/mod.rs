//! Database entities module

pub mod fare_calculation;
pub mod pricing_tier;
pub mod vehicle_type;

pub use fare_calculation::Entity as FareCalculation;
pub use pricing_tier::Entity as PricingTier;
pub use vehicle_type::Entity as VehicleType;
