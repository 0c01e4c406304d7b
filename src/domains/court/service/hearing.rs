//! Court hearing scheduling

use crate::config::CourtConfig;
use crate::domain::common::{parse_timestamp, validate_subject};
use crate::domain::{CourtHearing, LegalEntityHearing, NewHearing, PersonHearing};
use crate::error::{AppError, Result};
use crate::repository::Repository;
use std::sync::Arc;
use validator::Validate;

pub struct HearingService {
    hearings: Arc<dyn Repository<CourtHearing>>,
    court: CourtConfig,
}

impl HearingService {
    pub fn new(hearings: Arc<dyn Repository<CourtHearing>>, court: CourtConfig) -> Self {
        Self { hearings, court }
    }

    pub async fn get(&self, id: &str) -> Result<CourtHearing> {
        self.hearings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Court hearing {} not found", id)))
    }

    pub async fn create_person(&self, input: NewHearing) -> Result<CourtHearing> {
        input.validate()?;
        let subject = validate_subject(&input.subject)?.to_string();
        let date_time = parse_timestamp("date_time", &input.date_time)?;

        let hearing = CourtHearing::Person(PersonHearing {
            id: String::new(),
            reason: input.reason,
            date_time,
            court: self.court_name(input.court),
            subject,
            violation: None,
        });
        self.hearings.create(hearing).await
    }

    pub async fn create_legal_entity(&self, input: NewHearing) -> Result<CourtHearing> {
        input.validate()?;
        let subject = validate_subject(&input.subject)?.to_string();
        let date_time = parse_timestamp("date_time", &input.date_time)?;

        let hearing = CourtHearing::LegalEntity(LegalEntityHearing {
            id: String::new(),
            reason: input.reason,
            date_time,
            court: self.court_name(input.court),
            subject,
        });
        self.hearings.create(hearing).await
    }

    /// Move a hearing to `new_time`. A hearing can be postponed or kept at
    /// its current time, never moved earlier.
    pub async fn reschedule(&self, id: &str, new_time: &str) -> Result<CourtHearing> {
        let mut hearing = self.get(id).await?;
        let new_time = parse_timestamp("date_time", new_time)?;

        if new_time < hearing.date_time() {
            return Err(AppError::BadRequest(
                "Court hearing can't be rescheduled before set date and time".to_string(),
            ));
        }

        hearing.set_date_time(new_time);
        let hearing = self.hearings.update(hearing).await?;
        tracing::info!(hearing_id = %hearing.id(), date_time = %new_time, "Court hearing rescheduled");
        Ok(hearing)
    }

    fn court_name(&self, requested: Option<String>) -> String {
        requested
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| self.court.name.clone())
    }
}
