//! Fare aggregate
//!
//! Pricing tiers, the tiered fare calculator and its quote types.

pub mod calculator;
pub mod model;
pub mod repository;

pub use calculator::{validate_schedule, FareCalculator, DEFAULT_MAX_DISTANCE_KM};
pub use model::{
    format_money, round_distance, round_money, AppliedTier, FareQuote, LineItem, PricingTier,
};
pub use repository::PricingTierRepository;
