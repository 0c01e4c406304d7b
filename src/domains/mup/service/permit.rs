//! Traffic permit requests and approvals

use super::{random_code, DrivingBanService, GateDecision, WarrantGate};
use crate::client::Deadline;
use crate::domain::common::{now, validate_subject};
use crate::domain::TrafficPermit;
use crate::error::{AppError, Result};
use crate::repository::Repository;
use std::sync::Arc;

pub struct PermitService {
    permits: Arc<dyn Repository<TrafficPermit>>,
    bans: DrivingBanService,
    gate: WarrantGate,
}

impl PermitService {
    pub fn new(
        permits: Arc<dyn Repository<TrafficPermit>>,
        bans: DrivingBanService,
        gate: WarrantGate,
    ) -> Self {
        Self {
            permits,
            bans,
            gate,
        }
    }

    /// Submit a permit request for `subject`. Nothing is stored when the
    /// subject is banned from driving or has an outstanding warrant.
    pub async fn submit(
        &self,
        deadline: &Deadline,
        subject: &str,
        token: &str,
    ) -> Result<TrafficPermit> {
        let subject = validate_subject(subject)?;
        self.bans.ensure_not_banned(subject).await?;

        if let GateDecision::Deny(reason) = self.gate.check_and_gate(deadline, subject, token).await? {
            return Err(AppError::Forbidden(reason));
        }

        let permit = self
            .permits
            .create(TrafficPermit {
                id: String::new(),
                number: random_code(8),
                subject: subject.to_string(),
                approved: false,
                issued_date: now(),
            })
            .await?;
        tracing::info!(permit_id = %permit.id, "Traffic permit requested");
        Ok(permit)
    }

    pub async fn pending(&self) -> Result<Vec<TrafficPermit>> {
        Ok(self
            .permits
            .list()
            .await?
            .into_iter()
            .filter(|p| !p.approved)
            .collect())
    }

    pub async fn approve(&self, id: &str) -> Result<TrafficPermit> {
        let mut permit = self
            .permits
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Traffic permit {} not found", id)))?;
        if permit.approved {
            return Err(AppError::Conflict(format!(
                "Traffic permit {} is already approved",
                id
            )));
        }

        permit.approved = true;
        permit.issued_date = now();
        self.permits.update(permit).await
    }

    /// Every permit of `subject`, pending ones included
    pub async fn for_subject(&self, subject: &str) -> Result<Vec<TrafficPermit>> {
        let subject = validate_subject(subject)?;
        Ok(self
            .permits
            .list()
            .await?
            .into_iter()
            .filter(|p| p.subject == subject)
            .collect())
    }

    /// Most recently issued approved permit of `subject`
    pub async fn current_for(&self, subject: &str) -> Result<TrafficPermit> {
        let subject = validate_subject(subject)?;
        self.permits
            .list()
            .await?
            .into_iter()
            .filter(|p| p.approved && p.subject == subject)
            .max_by_key(|p| p.issued_date)
            .ok_or_else(|| AppError::NotFound(format!("No driving permit for {}", subject)))
    }
}
