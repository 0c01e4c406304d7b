//! Vehicle and driving authority (MUP) domain models

use super::common::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Reason recorded on bans derived from a court suspension
pub const SUSPENSION_BAN_REASON: &str = "License suspension";

/// Plate type recorded on plates issued at registration approval
pub const VEHICLE_PLATES: &str = "vehicle plates";

/// Driving ban. `duration` is the moment the ban ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivingBan {
    pub id: String,
    pub reason: String,
    #[serde(with = "timestamp")]
    pub duration: NaiveDateTime,
    pub subject: String,
    #[serde(with = "timestamp")]
    pub issued_at: NaiveDateTime,
}

impl DrivingBan {
    pub fn is_active_at(&self, moment: NaiveDateTime) -> bool {
        self.duration > moment
    }
}

/// Body of `POST /driving-ban`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewDrivingBan {
    #[validate(length(min = 1, max = 255))]
    pub reason: String,
    #[serde(with = "timestamp")]
    pub duration: NaiveDateTime,
    #[validate(length(min = 1, max = 128))]
    pub subject: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrivingBanStatus {
    pub driving_ban: bool,
}

/// Driving permit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficPermit {
    pub id: String,
    pub number: String,
    pub subject: String,
    pub approved: bool,
    #[serde(with = "timestamp")]
    pub issued_date: NaiveDateTime,
}

/// Body of `POST /traffic-permit`. Only admins may name another subject.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitPermitInput {
    #[serde(default)]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub subject: String,
    /// Id of the approved registration
    #[serde(default)]
    pub registration: Option<String>,
    #[serde(default)]
    pub plates: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewVehicle {
    #[validate(length(min = 1, max = 100))]
    pub brand: String,
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[serde(default)]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRegistration {
    pub id: String,
    pub registration_number: String,
    pub vehicle_id: String,
    pub subject: String,
    pub approved: bool,
    #[serde(with = "timestamp")]
    pub issued_date: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub expiration_date: NaiveDateTime,
    #[serde(default)]
    pub plates: Option<String>,
}

impl VehicleRegistration {
    pub fn is_valid_at(&self, moment: NaiveDateTime) -> bool {
        self.approved && self.expiration_date > moment
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRegistrationInput {
    pub vehicle_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plates {
    pub id: String,
    pub plate_number: String,
    pub plate_type: String,
    pub registration_number: String,
    pub subject: String,
}

/// Result of approving a registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationApproved {
    pub registration: VehicleRegistration,
    pub plates: Plates,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_driving_ban_activity_window() {
        let end = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let ban = DrivingBan {
            id: "b1".to_string(),
            reason: SUSPENSION_BAN_REASON.to_string(),
            duration: end,
            subject: "p-1".to_string(),
            issued_at: end - chrono::Duration::days(30),
        };

        assert!(ban.is_active_at(end - chrono::Duration::seconds(1)));
        assert!(!ban.is_active_at(end));
    }

    #[test]
    fn test_new_driving_ban_wire_shape() {
        let body = serde_json::json!({
            "reason": "License suspension",
            "duration": "2025-06-01T00:00:00",
            "subject": "p-1"
        });
        let ban: NewDrivingBan = serde_json::from_value(body).unwrap();
        assert_eq!(ban.subject, "p-1");
        assert!(serde_json::from_value::<NewDrivingBan>(serde_json::json!({
            "reason": "x",
            "duration": "next week",
            "subject": "p-1"
        }))
        .is_err());
    }
}
