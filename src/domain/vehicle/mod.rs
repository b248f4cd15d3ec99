//! Vehicle type aggregate

pub mod model;
pub mod repository;

pub use model::VehicleType;
pub use repository::VehicleTypeRepository;
