//! Traffic statistics models

use super::common::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Monthly figure for one violation type in a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficStatistic {
    pub id: String,
    #[serde(with = "timestamp")]
    pub date: NaiveDateTime,
    pub region: String,
    pub year: i32,
    pub month: u32,
    pub violation_type: String,
    pub violations: u64,
    pub registered_vehicles: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewTrafficStatistic {
    #[validate(length(min = 1, max = 100))]
    pub region: String,
    #[validate(range(min = 2000, max = 2100))]
    pub year: i32,
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
    #[validate(length(min = 1, max = 255))]
    pub violation_type: String,
    pub violations: u64,
    #[serde(default)]
    pub registered_vehicles: u64,
}

/// Body of `POST /traffic-statistics/generate`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateStatisticsInput {
    #[validate(length(min = 1, max = 100))]
    pub region: String,
    #[validate(range(min = 2000, max = 2100))]
    pub year: i32,
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
}

/// Count answered by `GET /registered-vehicles/{year}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleCount {
    pub count: u64,
}

/// Key under which a violations report carries its grand total
pub const TOTAL_VIOLATIONS: &str = "Total Violations";
