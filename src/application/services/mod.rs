//! Application services
//!
//! HTTP handlers are thin wrappers that delegate to these.

pub mod fare;
pub mod pricing;
pub mod usage;
pub mod vehicle;

pub use fare::{CalculateFare, FareCalculation, FareHistory, FareService};
pub use pricing::{NewPricingTier, PricingService, PricingTierChanges};
pub use usage::UsageService;
pub use vehicle::{NewVehicleType, VehicleService, VehicleTypeChanges};
