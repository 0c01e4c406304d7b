use crate::domain::common::{now, validate_subject};
use crate::domain::{NewTrafficViolation, TrafficViolation, UpdateTrafficViolation};
use crate::error::{AppError, Result};
use crate::repository::Repository;
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct ViolationService {
    violations: Arc<dyn Repository<TrafficViolation>>,
}

impl ViolationService {
    pub fn new(violations: Arc<dyn Repository<TrafficViolation>>) -> Self {
        Self { violations }
    }

    pub async fn create(&self, input: NewTrafficViolation) -> Result<TrafficViolation> {
        input.validate()?;
        let violator = validate_subject(&input.violator)?.to_string();

        self.violations
            .create(TrafficViolation {
                id: String::new(),
                reason: input.reason,
                description: input.description,
                time: input.time.unwrap_or_else(now),
                location: input.location,
                violator,
            })
            .await
    }

    pub async fn get(&self, id: &str) -> Result<TrafficViolation> {
        self.violations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Traffic violation {} not found", id)))
    }

    pub async fn list(&self) -> Result<Vec<TrafficViolation>> {
        self.violations.list().await
    }

    pub async fn for_violator(&self, subject: &str) -> Result<Vec<TrafficViolation>> {
        let subject = validate_subject(subject)?;
        Ok(self
            .violations
            .list()
            .await?
            .into_iter()
            .filter(|v| v.violator == subject)
            .collect())
    }

    /// Apply the provided, non-empty fields of `input`
    pub async fn update(&self, id: &str, input: UpdateTrafficViolation) -> Result<TrafficViolation> {
        let mut violation = self.get(id).await?;

        if let Some(reason) = non_empty(input.reason) {
            violation.reason = reason;
        }
        if let Some(description) = non_empty(input.description) {
            violation.description = description;
        }
        if let Some(time) = input.time {
            violation.time = time;
        }
        if let Some(location) = non_empty(input.location) {
            violation.location = location;
        }
        if let Some(violator) = non_empty(input.violator) {
            violation.violator = validate_subject(&violator)?.to_string();
        }

        self.violations.update(violation).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.get(id).await?;
        self.violations.delete(id).await
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
