use crate::domain::common::{now, validate_subject};
use crate::domain::{NewWarrant, Warrant};
use crate::error::Result;
use crate::repository::Repository;
use std::sync::Arc;
use validator::Validate;

pub struct WarrantService {
    warrants: Arc<dyn Repository<Warrant>>,
}

impl WarrantService {
    pub fn new(warrants: Arc<dyn Repository<Warrant>>) -> Self {
        Self { warrants }
    }

    pub async fn issue(&self, input: NewWarrant) -> Result<Warrant> {
        input.validate()?;
        let issued_for = validate_subject(&input.issued_for)?.to_string();

        let warrant = self
            .warrants
            .create(Warrant {
                id: String::new(),
                traffic_violation: input.traffic_violation,
                issued_on: now(),
                issued_for,
            })
            .await?;
        tracing::info!(warrant_id = %warrant.id, "Warrant issued");
        Ok(warrant)
    }

    /// Warrants issued for `subject`, empty when there are none
    pub async fn for_subject(&self, subject: &str) -> Result<Vec<Warrant>> {
        let subject = validate_subject(subject)?;
        Ok(self
            .warrants
            .list()
            .await?
            .into_iter()
            .filter(|w| w.issued_for == subject)
            .collect())
    }
}
