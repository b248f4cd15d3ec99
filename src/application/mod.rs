pub mod services;

// Re-export key types for convenience
pub use services::{
    CalculateFare, FareCalculation, FareHistory, FareService, NewPricingTier, NewVehicleType,
    PricingService, PricingTierChanges, UsageService, VehicleService, VehicleTypeChanges,
};
