//! Traffic police domain models

use super::common::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Blood alcohol level above which a driver is considered drunk
pub const ALCOHOL_LIMIT: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficViolation {
    pub id: String,
    pub reason: String,
    pub description: String,
    #[serde(with = "timestamp")]
    pub time: NaiveDateTime,
    pub location: String,
    /// Subject id of the violator
    pub violator: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewTrafficViolation {
    #[validate(length(min = 1, max = 255))]
    pub reason: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to the moment the violation is recorded
    #[serde(default, with = "timestamp::option")]
    pub time: Option<NaiveDateTime>,
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    #[validate(length(min = 1, max = 128))]
    pub violator: String,
}

/// Partial update. Absent or empty fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTrafficViolation {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub time: Option<NaiveDateTime>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub violator: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AlcoholTest {
    #[validate(email)]
    pub driver_email: String,
    #[validate(range(min = 0.0))]
    pub alcohol_level: f64,
    #[validate(length(min = 1))]
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DriverCheck {
    #[validate(length(min = 1, max = 128))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VehicleCheck {
    #[validate(length(min = 1, max = 32))]
    pub plate: String,
    #[validate(length(min = 1, max = 128))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub location: String,
}

/// Outcome of a roadside check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionOutcome {
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation: Option<TrafficViolation>,
}

impl InspectionOutcome {
    pub fn passed() -> Self {
        Self {
            passed: true,
            violation: None,
        }
    }

    pub fn violation(violation: TrafficViolation) -> Self {
        Self {
            passed: false,
            violation: Some(violation),
        }
    }
}
