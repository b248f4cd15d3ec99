//! Fare calculation aggregate

pub mod model;
pub mod repository;

pub use model::{
    CalculationFilter, CalculationSummary, FareCalculationRecord, SortOrder, ANONYMOUS_CLIENT,
};
pub use repository::FareCalculationRepository;
