//! Court domain models: hearings, warrants, suspensions and crime reports

use super::common::timestamp;
use super::mup::DrivingBan;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Hearing concerning a natural person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonHearing {
    pub id: String,
    pub reason: String,
    #[serde(with = "timestamp")]
    pub date_time: NaiveDateTime,
    pub court: String,
    pub subject: String,
    /// Violation that triggered the hearing, when it came from a crime report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation: Option<String>,
}

/// Hearing concerning a legal entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalEntityHearing {
    pub id: String,
    pub reason: String,
    #[serde(with = "timestamp")]
    pub date_time: NaiveDateTime,
    pub court: String,
    pub subject: String,
}

/// A court hearing is one of two record shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CourtHearing {
    Person(PersonHearing),
    LegalEntity(LegalEntityHearing),
}

impl CourtHearing {
    pub fn id(&self) -> &str {
        match self {
            CourtHearing::Person(h) => &h.id,
            CourtHearing::LegalEntity(h) => &h.id,
        }
    }

    pub fn date_time(&self) -> NaiveDateTime {
        match self {
            CourtHearing::Person(h) => h.date_time,
            CourtHearing::LegalEntity(h) => h.date_time,
        }
    }

    pub fn subject(&self) -> &str {
        match self {
            CourtHearing::Person(h) => &h.subject,
            CourtHearing::LegalEntity(h) => &h.subject,
        }
    }

    pub(crate) fn set_id(&mut self, id: String) {
        match self {
            CourtHearing::Person(h) => h.id = id,
            CourtHearing::LegalEntity(h) => h.id = id,
        }
    }

    pub(crate) fn set_date_time(&mut self, date_time: NaiveDateTime) {
        match self {
            CourtHearing::Person(h) => h.date_time = date_time,
            CourtHearing::LegalEntity(h) => h.date_time = date_time,
        }
    }
}

/// Input for scheduling a hearing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewHearing {
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
    pub date_time: String,
    #[validate(length(min = 1, max = 128))]
    pub subject: String,
    /// Defaults to the court this service runs for
    #[serde(default)]
    pub court: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleHearingInput {
    pub date_time: String,
}

/// Warrant issued for a subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warrant {
    pub id: String,
    pub traffic_violation: String,
    #[serde(with = "timestamp")]
    pub issued_on: NaiveDateTime,
    pub issued_for: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewWarrant {
    #[validate(length(min = 1))]
    pub traffic_violation: String,
    #[validate(length(min = 1, max = 128))]
    pub issued_for: String,
}

/// License suspension. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suspension {
    pub id: String,
    #[serde(with = "timestamp")]
    pub from: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub to: NaiveDateTime,
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSuspension {
    pub from: String,
    pub to: String,
    pub subject: String,
}

/// Suspension together with the driving ban it produced at MUP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspensionCreated {
    pub suspension: Suspension,
    pub driving_ban: DrivingBan,
}

/// Record of a crime report received from the police
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrimeReport {
    pub id: String,
    pub violation_id: String,
    pub subject: String,
    pub hearing_id: String,
    #[serde(with = "timestamp")]
    pub received_at: NaiveDateTime,
}

/// Acknowledgement returned to the reporting service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrimeReportReceipt {
    pub crime_report_id: String,
    pub hearing_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_hearing_is_tagged_by_kind() {
        let hearing = CourtHearing::LegalEntity(LegalEntityHearing {
            id: "h1".to_string(),
            reason: "unpaid fines".to_string(),
            date_time: at(9),
            court: "Misdemeanor Court".to_string(),
            subject: "company-1".to_string(),
        });

        let value = serde_json::to_value(&hearing).unwrap();
        assert_eq!(value["kind"], "legal_entity");
        assert_eq!(value["date_time"], "2025-01-10T09:00:00");

        let back: CourtHearing = serde_json::from_value(value).unwrap();
        assert_eq!(back, hearing);
    }

    #[test]
    fn test_person_hearing_accessors() {
        let mut hearing: CourtHearing = serde_json::from_value(json!({
            "kind": "person",
            "id": "h2",
            "reason": "speeding",
            "date_time": "2025-01-10T09:00:00",
            "court": "Misdemeanor Court",
            "subject": "p-1"
        }))
        .unwrap();

        assert_eq!(hearing.id(), "h2");
        assert_eq!(hearing.subject(), "p-1");
        hearing.set_date_time(at(11));
        assert_eq!(hearing.date_time(), at(11));
    }
}
