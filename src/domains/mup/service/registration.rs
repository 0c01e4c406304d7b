//! Vehicle registration requests, approvals and plate issuance

use super::{random_code, DrivingBanService, GateDecision, VehicleService, WarrantGate};
use crate::client::Deadline;
use crate::domain::common::{now, validate_subject};
use crate::domain::{Plates, RegistrationApproved, VehicleRegistration, VEHICLE_PLATES};
use crate::error::{AppError, Result};
use crate::repository::Repository;
use chrono::{Months, NaiveDateTime};
use std::sync::Arc;

/// Validity of an approved registration
const REGISTRATION_VALIDITY: Months = Months::new(12 * 5);

pub struct RegistrationService {
    registrations: Arc<dyn Repository<VehicleRegistration>>,
    plates: Arc<dyn Repository<Plates>>,
    vehicles: VehicleService,
    bans: DrivingBanService,
    gate: WarrantGate,
}

impl RegistrationService {
    pub fn new(
        registrations: Arc<dyn Repository<VehicleRegistration>>,
        plates: Arc<dyn Repository<Plates>>,
        vehicles: VehicleService,
        bans: DrivingBanService,
        gate: WarrantGate,
    ) -> Self {
        Self {
            registrations,
            plates,
            vehicles,
            bans,
            gate,
        }
    }

    /// Submit a registration request for a vehicle owned by `subject`
    pub async fn submit(
        &self,
        deadline: &Deadline,
        subject: &str,
        vehicle_id: &str,
        token: &str,
    ) -> Result<VehicleRegistration> {
        let subject = validate_subject(subject)?;
        let vehicle = self.vehicles.get(vehicle_id).await?;
        if vehicle.subject != subject {
            return Err(AppError::Forbidden(format!(
                "Vehicle {} is not owned by {}",
                vehicle_id, subject
            )));
        }

        self.bans.ensure_not_banned(subject).await?;
        if let GateDecision::Deny(reason) = self.gate.check_and_gate(deadline, subject, token).await? {
            return Err(AppError::Forbidden(reason));
        }

        let issued = now();
        let registration = self
            .registrations
            .create(VehicleRegistration {
                id: String::new(),
                registration_number: random_code(8),
                vehicle_id: vehicle.id,
                subject: subject.to_string(),
                approved: false,
                issued_date: issued,
                expiration_date: issued,
                plates: None,
            })
            .await?;
        tracing::info!(registration_id = %registration.id, "Vehicle registration requested");
        Ok(registration)
    }

    pub async fn pending(&self) -> Result<Vec<VehicleRegistration>> {
        Ok(self
            .registrations
            .list()
            .await?
            .into_iter()
            .filter(|r| !r.approved)
            .collect())
    }

    /// Approve a pending registration, issue its plates and link both onto
    /// the vehicle.
    pub async fn approve(&self, id: &str) -> Result<RegistrationApproved> {
        let mut registration = self
            .registrations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Registration {} not found", id)))?;
        if registration.approved {
            return Err(AppError::Conflict(format!(
                "Registration {} is already approved",
                id
            )));
        }
        let mut vehicle = self.vehicles.get(&registration.vehicle_id).await?;

        let issued = now();
        let plates = self
            .plates
            .create(Plates {
                id: String::new(),
                plate_number: format!("SRB-{}-{}", random_code(3), random_code(2)),
                plate_type: VEHICLE_PLATES.to_string(),
                registration_number: registration.registration_number.clone(),
                subject: registration.subject.clone(),
            })
            .await?;

        registration.approved = true;
        registration.issued_date = issued;
        registration.expiration_date = expiration_from(issued);
        registration.plates = Some(plates.plate_number.clone());
        let registration = self.registrations.update(registration).await?;

        vehicle.registration = Some(registration.registration_number.clone());
        vehicle.plates = Some(plates.plate_number.clone());
        self.vehicles.update(vehicle).await?;

        tracing::info!(
            registration_id = %registration.id,
            plate_number = %plates.plate_number,
            "Vehicle registration approved"
        );
        Ok(RegistrationApproved {
            registration,
            plates,
        })
    }

    pub async fn for_subject(&self, subject: &str) -> Result<Vec<VehicleRegistration>> {
        let subject = validate_subject(subject)?;
        Ok(self
            .registrations
            .list()
            .await?
            .into_iter()
            .filter(|r| r.subject == subject)
            .collect())
    }

    pub async fn by_plate(&self, plate: &str) -> Result<VehicleRegistration> {
        self.registrations
            .list()
            .await?
            .into_iter()
            .find(|r| r.plates.as_deref() == Some(plate))
            .ok_or_else(|| AppError::NotFound(format!("No registration for plates {}", plate)))
    }
}

fn expiration_from(issued: NaiveDateTime) -> NaiveDateTime {
    issued
        .checked_add_months(REGISTRATION_VALIDITY)
        .unwrap_or(NaiveDateTime::MAX)
}
