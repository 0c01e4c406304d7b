//! License suspensions and the driving ban each one implies
//!
//! A suspension is stored first, then mirrored to MUP as a driving ban. The
//! two writes are not atomic: when the ban call fails the suspension stays
//! stored and the failure is returned as [`AppError::Cascade`] carrying the
//! suspension id.

use crate::client::{Deadline, DrivingBanNotifier};
use crate::domain::common::{parse_timestamp, validate_subject};
use crate::domain::{NewDrivingBan, NewSuspension, Suspension, SuspensionCreated, SUSPENSION_BAN_REASON};
use crate::error::{AppError, Result};
use crate::repository::Repository;
use metrics::counter;
use std::sync::Arc;

pub struct SuspensionService {
    suspensions: Arc<dyn Repository<Suspension>>,
    bans: Arc<dyn DrivingBanNotifier>,
}

impl SuspensionService {
    pub fn new(
        suspensions: Arc<dyn Repository<Suspension>>,
        bans: Arc<dyn DrivingBanNotifier>,
    ) -> Self {
        Self { suspensions, bans }
    }

    pub async fn get(&self, id: &str) -> Result<Suspension> {
        self.suspensions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Suspension {} not found", id)))
    }

    pub async fn create(
        &self,
        deadline: &Deadline,
        input: NewSuspension,
        token: &str,
    ) -> Result<SuspensionCreated> {
        let from = parse_timestamp("from", &input.from)?;
        let to = parse_timestamp("to", &input.to)?;
        if to < from {
            return Err(AppError::BadRequest(
                "Suspension must end after it starts".to_string(),
            ));
        }
        let subject = validate_subject(&input.subject)?.to_string();

        let suspension = self
            .suspensions
            .create(Suspension {
                id: String::new(),
                from,
                to,
                subject: subject.clone(),
            })
            .await?;

        let ban = NewDrivingBan {
            reason: SUSPENSION_BAN_REASON.to_string(),
            duration: to,
            subject,
        };

        match self.bans.issue_driving_ban(deadline, &ban, token).await {
            Ok(driving_ban) => {
                tracing::info!(
                    suspension_id = %suspension.id,
                    driving_ban_id = %driving_ban.id,
                    "Suspension stored and driving ban issued"
                );
                Ok(SuspensionCreated {
                    suspension,
                    driving_ban,
                })
            }
            Err(source) => {
                counter!("uprava_cascade_failures_total", "kind" => source.kind()).increment(1);
                tracing::error!(
                    suspension_id = %suspension.id,
                    subject = %suspension.subject,
                    kind = source.kind(),
                    "Driving ban not issued for stored suspension, manual remediation required"
                );
                Err(AppError::Cascade {
                    suspension_id: suspension.id,
                    source,
                })
            }
        }
    }
}
