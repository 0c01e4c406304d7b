//! Crime report intake
//!
//! A traffic violation reported by the police is turned into a person
//! hearing scheduled a fixed delay after the report arrives.

use crate::client::{Deadline, PersonDirectory};
use crate::config::CourtConfig;
use crate::domain::common::now;
use crate::domain::{CourtHearing, CrimeReport, CrimeReportReceipt, PersonHearing, TrafficViolation};
use crate::error::{AppError, Result};
use crate::repository::Repository;
use anyhow::anyhow;
use chrono::{NaiveDateTime, TimeDelta};
use std::sync::Arc;

pub struct CrimeReportService {
    hearings: Arc<dyn Repository<CourtHearing>>,
    reports: Arc<dyn Repository<CrimeReport>>,
    people: Arc<dyn PersonDirectory>,
    court: CourtConfig,
}

impl CrimeReportService {
    pub fn new(
        hearings: Arc<dyn Repository<CourtHearing>>,
        reports: Arc<dyn Repository<CrimeReport>>,
        people: Arc<dyn PersonDirectory>,
        court: CourtConfig,
    ) -> Self {
        Self {
            hearings,
            reports,
            people,
            court,
        }
    }

    pub async fn receive(
        &self,
        deadline: &Deadline,
        violation: TrafficViolation,
        token: &str,
    ) -> Result<CrimeReportReceipt> {
        let person = self
            .people
            .person_by_id(deadline, &violation.violator, token)
            .await?;

        let received_at = now();
        let date_time = hearing_time(received_at, self.court.hearing_delay_hours)?;
        let hearing = self
            .hearings
            .create(CourtHearing::Person(PersonHearing {
                id: String::new(),
                reason: violation.reason.clone(),
                date_time,
                court: self.court.name.clone(),
                subject: person.id.clone(),
                violation: Some(violation.id.clone()),
            }))
            .await?;

        let report = self
            .reports
            .create(CrimeReport {
                id: String::new(),
                violation_id: violation.id,
                subject: person.id,
                hearing_id: hearing.id().to_string(),
                received_at,
            })
            .await?;

        tracing::info!(
            crime_report_id = %report.id,
            hearing_id = %report.hearing_id,
            "Crime report received, hearing scheduled"
        );

        Ok(CrimeReportReceipt {
            crime_report_id: report.id,
            hearing_id: report.hearing_id,
        })
    }

}

fn hearing_time(received_at: NaiveDateTime, delay_hours: i64) -> Result<NaiveDateTime> {
    TimeDelta::try_hours(delay_hours)
        .and_then(|delay| received_at.checked_add_signed(delay))
        .ok_or_else(|| {
            AppError::Internal(anyhow!(
                "hearing delay of {} hours is out of range",
                delay_hours
            ))
        })
}
