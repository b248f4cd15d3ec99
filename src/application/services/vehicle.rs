//! Vehicle type administration

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{DomainError, DomainResult, RepositoryProvider, VehicleType};

const MAX_NAME_LEN: usize = 50;

#[derive(Debug, Clone)]
pub struct NewVehicleType {
    pub name: String,
    pub display_name: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VehicleTypeChanges {
    pub display_name: Option<String>,
    pub icon: Option<String>,
    pub is_active: Option<bool>,
}

pub struct VehicleService {
    repos: Arc<dyn RepositoryProvider>,
}

impl VehicleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self, include_inactive: bool) -> DomainResult<Vec<VehicleType>> {
        self.repos.vehicle_types().find_all(include_inactive).await
    }

    pub async fn create(&self, new: NewVehicleType) -> DomainResult<VehicleType> {
        let name = new.name.trim().to_string();
        validate_name(&name)?;

        if self.repos.vehicle_types().find_by_name(&name).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "vehicle type '{}' already exists",
                name
            )));
        }

        let vehicle = VehicleType {
            id: 0,
            name,
            display_name: new.display_name,
            icon: new.icon,
            is_active: true,
            created_at: Utc::now(),
        };
        let saved = self.repos.vehicle_types().save(vehicle).await?;
        info!(vehicle_type = %saved.name, "Vehicle type created");
        Ok(saved)
    }

    pub async fn update(&self, id: i32, changes: VehicleTypeChanges) -> DomainResult<VehicleType> {
        let mut vehicle = self
            .repos
            .vehicle_types()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("VehicleType", "id", id))?;

        if let Some(display_name) = changes.display_name {
            vehicle.display_name = display_name;
        }
        if let Some(icon) = changes.icon {
            vehicle.icon = Some(icon);
        }
        if let Some(is_active) = changes.is_active {
            vehicle.is_active = is_active;
        }

        let saved = self.repos.vehicle_types().update(vehicle).await?;
        info!(vehicle_type = %saved.name, active = saved.is_active, "Vehicle type updated");
        Ok(saved)
    }
}

/// Names are lowercase identifiers: `a-z`, `0-9`, `_` and `-`.
fn validate_name(name: &str) -> DomainResult<()> {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(DomainError::Validation(format!(
            "vehicle type name must be 1-{} characters",
            MAX_NAME_LEN
        )));
    }
    let valid = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if !valid {
        return Err(DomainError::Validation(
            "vehicle type name may only contain a-z, 0-9, '_' and '-'".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn service() -> VehicleService {
        VehicleService::new(Arc::new(InMemoryRepositoryProvider::seeded()))
    }

    fn new_vehicle(name: &str) -> NewVehicleType {
        NewVehicleType {
            name: name.into(),
            display_name: "Tricycle".into(),
            icon: Some("bike".into()),
        }
    }

    #[tokio::test]
    async fn test_seeded_vehicle_types() {
        let names: Vec<String> = service()
            .list(false)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["car", "motorcycle"]);
    }

    #[tokio::test]
    async fn test_create_and_duplicate() {
        let svc = service();
        let created = svc.create(new_vehicle("tricycle")).await.unwrap();
        assert!(created.id > 0);
        assert!(created.is_active);

        let err = svc.create(new_vehicle("tricycle")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_names() {
        let svc = service();
        for name in ["", "Big Van", "van!"] {
            assert!(matches!(
                svc.create(new_vehicle(name)).await,
                Err(DomainError::Validation(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_update_and_deactivate() {
        let svc = service();
        let car = svc
            .list(false)
            .await
            .unwrap()
            .into_iter()
            .find(|v| v.name == "car")
            .unwrap();

        let updated = svc
            .update(
                car.id,
                VehicleTypeChanges {
                    display_name: Some("Sedan".into()),
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.display_name, "Sedan");
        assert!(!updated.is_active);

        assert_eq!(svc.list(false).await.unwrap().len(), 1);
        assert_eq!(svc.list(true).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_unknown() {
        let err = service()
            .update(404, VehicleTypeChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
