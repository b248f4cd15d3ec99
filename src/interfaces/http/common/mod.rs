//! Shared HTTP building blocks: response envelope, error mapping, extractors

pub mod client_info;
pub mod error;
pub mod response;
pub mod validated_json;

pub use client_info::ClientInfo;
pub use error::{domain_error, ApiError};
pub use response::{ApiResponse, PaginatedResponse};
pub use validated_json::ValidatedJson;
