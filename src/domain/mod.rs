pub mod calculation;
pub mod fare;
pub mod repositories;
pub mod usage;
pub mod vehicle;

// Re-export commonly used types
pub use calculation::{
    CalculationFilter, CalculationSummary, FareCalculationRecord, SortOrder, ANONYMOUS_CLIENT,
};
pub use fare::{FareCalculator, FareQuote, LineItem, PricingTier};
pub use repositories::{DomainResult, RepositoryProvider};
pub use usage::{UsagePeriod, UsageReport};
pub use vehicle::VehicleType;

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
