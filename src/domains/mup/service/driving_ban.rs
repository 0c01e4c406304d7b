use crate::domain::common::{now, validate_subject};
use crate::domain::{DrivingBan, NewDrivingBan};
use crate::error::{AppError, Result};
use crate::repository::Repository;
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct DrivingBanService {
    bans: Arc<dyn Repository<DrivingBan>>,
}

impl DrivingBanService {
    pub fn new(bans: Arc<dyn Repository<DrivingBan>>) -> Self {
        Self { bans }
    }

    pub async fn issue(&self, input: NewDrivingBan) -> Result<DrivingBan> {
        input.validate()?;
        let subject = validate_subject(&input.subject)?.to_string();

        let ban = self
            .bans
            .create(DrivingBan {
                id: String::new(),
                reason: input.reason,
                duration: input.duration,
                subject,
                issued_at: now(),
            })
            .await?;
        tracing::info!(driving_ban_id = %ban.id, until = %ban.duration, "Driving ban issued");
        Ok(ban)
    }

    pub async fn for_subject(&self, subject: &str) -> Result<Vec<DrivingBan>> {
        let subject = validate_subject(subject)?;
        Ok(self
            .bans
            .list()
            .await?
            .into_iter()
            .filter(|b| b.subject == subject)
            .collect())
    }

    /// Whether any ban for `subject` is still running
    pub async fn has_active(&self, subject: &str) -> Result<bool> {
        let moment = now();
        Ok(self
            .for_subject(subject)
            .await?
            .iter()
            .any(|b| b.is_active_at(moment)))
    }

    /// Refuse a request from a subject with a running ban
    pub async fn ensure_not_banned(&self, subject: &str) -> Result<()> {
        if self.has_active(subject).await? {
            return Err(AppError::Forbidden(
                "subject has an active driving ban".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use chrono::Duration;

    fn ban(subject: &str, until: chrono::NaiveDateTime) -> NewDrivingBan {
        NewDrivingBan {
            reason: "Speeding".to_string(),
            duration: until,
            subject: subject.to_string(),
        }
    }

    #[tokio::test]
    async fn test_expired_ban_is_not_active() {
        let service = DrivingBanService::new(Arc::new(InMemoryRepository::new()));
        service
            .issue(ban("p-1", now() - Duration::days(1)))
            .await
            .unwrap();

        assert!(!service.has_active("p-1").await.unwrap());
        assert!(service.ensure_not_banned("p-1").await.is_ok());
        assert_eq!(service.for_subject("p-1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_running_ban_is_active() {
        let service = DrivingBanService::new(Arc::new(InMemoryRepository::new()));
        service
            .issue(ban("p-1", now() + Duration::days(30)))
            .await
            .unwrap();

        assert!(service.has_active("p-1").await.unwrap());
        assert!(!service.has_active("p-2").await.unwrap());
        assert!(matches!(
            service.ensure_not_banned("p-1").await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_issue_rejects_empty_reason() {
        let service = DrivingBanService::new(Arc::new(InMemoryRepository::new()));
        let mut input = ban("p-1", now());
        input.reason = String::new();
        assert!(matches!(
            service.issue(input).await,
            Err(AppError::Validation(_))
        ));
    }
}
