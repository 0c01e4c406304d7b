use crate::domain::common::validate_subject;
use crate::domain::{NewVehicle, Vehicle};
use crate::error::{AppError, Result};
use crate::repository::Repository;
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct VehicleService {
    vehicles: Arc<dyn Repository<Vehicle>>,
}

impl VehicleService {
    pub fn new(vehicles: Arc<dyn Repository<Vehicle>>) -> Self {
        Self { vehicles }
    }

    /// Record a vehicle owned by `owner`
    pub async fn create(&self, owner: &str, input: NewVehicle) -> Result<Vehicle> {
        input.validate()?;
        let owner = validate_subject(owner)?;

        self.vehicles
            .create(Vehicle {
                id: String::new(),
                brand: input.brand,
                model: input.model,
                year: input.year,
                subject: owner.to_string(),
                registration: None,
                plates: None,
            })
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Vehicle> {
        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", id)))
    }

    pub async fn owned_by(&self, subject: &str) -> Result<Vec<Vehicle>> {
        let subject = validate_subject(subject)?;
        Ok(self
            .vehicles
            .list()
            .await?
            .into_iter()
            .filter(|v| v.subject == subject)
            .collect())
    }

    /// Vehicles with an approved registration
    pub async fn registered(&self) -> Result<Vec<Vehicle>> {
        Ok(self
            .vehicles
            .list()
            .await?
            .into_iter()
            .filter(|v| v.registration.is_some())
            .collect())
    }

    pub(crate) async fn update(&self, vehicle: Vehicle) -> Result<Vehicle> {
        self.vehicles.update(vehicle).await
    }
}
