//! MUP business logic

pub mod driving_ban;
pub mod permit;
pub mod registration;
pub mod vehicle;
pub mod warrant_gate;

pub use driving_ban::DrivingBanService;
pub use permit::PermitService;
pub use registration::RegistrationService;
pub use vehicle::VehicleService;
pub use warrant_gate::{GateDecision, WarrantCheck, WarrantGate};

use rand::{distributions::Alphanumeric, Rng};

/// Random alphanumeric code used for permit, registration and plate numbers
pub(crate) fn random_code(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
