use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Bad caller input (distance out of range, unknown vehicle type, ...)
    #[error("Validation: {0}")]
    Validation(String),

    /// Valid input, but the pricing data cannot answer it
    #[error("Configuration: {0}")]
    Configuration(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Storage: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        DomainError::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infra_error_maps_to_storage() {
        let err: DomainError = InfraError::Database(sea_orm::DbErr::Custom("boom".into())).into();
        assert!(matches!(err, DomainError::Storage(ref msg) if msg.contains("boom")));
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            DomainError::Validation("unknown vehicle type".into()).to_string(),
            "Validation: unknown vehicle type"
        );
        assert_eq!(
            DomainError::not_found("PricingTier", "id", 7).to_string(),
            "Not found: PricingTier with id=7"
        );
    }
}
