use super::service::{DrivingBanService, PermitService, RegistrationService, VehicleService};
use std::sync::Arc;

/// State required by the MUP handlers
pub trait MupContext: Clone + Send + Sync + 'static {
    fn permit_service(&self) -> &PermitService;
    fn vehicle_service(&self) -> &VehicleService;
    fn registration_service(&self) -> &RegistrationService;
    fn driving_ban_service(&self) -> &DrivingBanService;
}

/// MUP service state
#[derive(Clone)]
pub struct MupState {
    pub permits: Arc<PermitService>,
    pub vehicles: VehicleService,
    pub registrations: Arc<RegistrationService>,
    pub driving_bans: DrivingBanService,
}

impl MupContext for MupState {
    fn permit_service(&self) -> &PermitService {
        &self.permits
    }

    fn vehicle_service(&self) -> &VehicleService {
        &self.vehicles
    }

    fn registration_service(&self) -> &RegistrationService {
        &self.registrations
    }

    fn driving_ban_service(&self) -> &DrivingBanService {
        &self.driving_bans
    }
}
