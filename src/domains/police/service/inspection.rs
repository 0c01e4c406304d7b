//! Roadside checks
//!
//! Each check either passes or records a traffic violation and files it with
//! the court as a crime report. Lookups against MUP that come back 404 are
//! answers ("no permit", "no registration"), not failures.

use super::ViolationService;
use crate::client::{ClientError, CrimeReportSink, Deadline, MupRegistry, PersonDirectory};
use crate::domain::common::now;
use crate::domain::{
    AlcoholTest, DriverCheck, InspectionOutcome, NewTrafficViolation, TrafficPermit,
    VehicleCheck, VehicleRegistration, ALCOHOL_LIMIT,
};
use crate::error::Result;
use std::sync::Arc;
use validator::Validate;

pub const DRIVING_WHILE_BANNED: &str = "driving while banned";
pub const DRIVING_WITHOUT_PERMIT: &str = "driving without a valid permit";
pub const UNREGISTERED_VEHICLE: &str = "driving an unregistered vehicle";

pub struct InspectionService {
    violations: ViolationService,
    people: Arc<dyn PersonDirectory>,
    mup: Arc<dyn MupRegistry>,
    court: Arc<dyn CrimeReportSink>,
}

impl InspectionService {
    pub fn new(
        violations: ViolationService,
        people: Arc<dyn PersonDirectory>,
        mup: Arc<dyn MupRegistry>,
        court: Arc<dyn CrimeReportSink>,
    ) -> Self {
        Self {
            violations,
            people,
            mup,
            court,
        }
    }

    pub async fn alcohol(
        &self,
        deadline: &Deadline,
        input: AlcoholTest,
        token: &str,
    ) -> Result<InspectionOutcome> {
        input.validate()?;
        let driver = self
            .people
            .person_by_email(deadline, &input.driver_email, token)
            .await?;

        if input.alcohol_level <= ALCOHOL_LIMIT {
            return Ok(InspectionOutcome::passed());
        }

        let reason = format!("drunk driving: {:.2}", input.alcohol_level);
        self.record(deadline, reason, &driver.id, input.location, token)
            .await
    }

    pub async fn driver_ban(
        &self,
        deadline: &Deadline,
        input: DriverCheck,
        token: &str,
    ) -> Result<InspectionOutcome> {
        input.validate()?;
        let banned = self
            .mup
            .has_active_driving_ban(deadline, &input.subject, token)
            .await?;

        if !banned {
            return Ok(InspectionOutcome::passed());
        }
        self.record(
            deadline,
            DRIVING_WHILE_BANNED.to_string(),
            &input.subject,
            input.location,
            token,
        )
        .await
    }

    pub async fn driver_permit(
        &self,
        deadline: &Deadline,
        input: DriverCheck,
        token: &str,
    ) -> Result<InspectionOutcome> {
        input.validate()?;
        let permit = not_found_as_none(
            self.mup
                .driving_permit_for(deadline, &input.subject, token)
                .await,
        )?;

        if permit.as_ref().is_some_and(|p: &TrafficPermit| p.approved) {
            return Ok(InspectionOutcome::passed());
        }
        self.record(
            deadline,
            DRIVING_WITHOUT_PERMIT.to_string(),
            &input.subject,
            input.location,
            token,
        )
        .await
    }

    pub async fn vehicle_registration(
        &self,
        deadline: &Deadline,
        input: VehicleCheck,
        token: &str,
    ) -> Result<InspectionOutcome> {
        input.validate()?;
        let registration = not_found_as_none(
            self.mup
                .registration_by_plate(deadline, &input.plate, token)
                .await,
        )?;

        let moment = now();
        if registration
            .as_ref()
            .is_some_and(|r: &VehicleRegistration| r.is_valid_at(moment))
        {
            return Ok(InspectionOutcome::passed());
        }
        self.record(
            deadline,
            UNREGISTERED_VEHICLE.to_string(),
            &input.subject,
            input.location,
            token,
        )
        .await
    }

    /// Store the violation, then report it to the court
    async fn record(
        &self,
        deadline: &Deadline,
        reason: String,
        violator: &str,
        location: String,
        token: &str,
    ) -> Result<InspectionOutcome> {
        let violation = self
            .violations
            .create(NewTrafficViolation {
                reason,
                description: String::new(),
                time: None,
                location,
                violator: violator.to_string(),
            })
            .await?;

        let receipt = self
            .court
            .submit_crime_report(deadline, &violation, token)
            .await?;
        tracing::info!(
            violation_id = %violation.id,
            crime_report_id = %receipt.crime_report_id,
            "Traffic violation recorded and reported"
        );

        Ok(InspectionOutcome::violation(violation))
    }
}

fn not_found_as_none<T>(result: std::result::Result<T, ClientError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::court::MockCrimeReportSink;
    use crate::client::identity::MockPersonDirectory;
    use crate::client::mup::MockMupRegistry;
    use crate::domain::{CrimeReportReceipt, Person};
    use crate::error::AppError;
    use crate::repository::InMemoryRepository;
    use chrono::Duration;
    use reqwest::{Method, StatusCode};

    struct Mocks {
        people: MockPersonDirectory,
        mup: MockMupRegistry,
        court: MockCrimeReportSink,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                people: MockPersonDirectory::new(),
                mup: MockMupRegistry::new(),
                court: MockCrimeReportSink::new(),
            }
        }

        fn expect_reports(mut self, times: usize) -> Self {
            self.court
                .expect_submit_crime_report()
                .times(times)
                .returning(|_, v, _| {
                    Ok(CrimeReportReceipt {
                        crime_report_id: format!("cr-{}", v.id),
                        hearing_id: "h-1".to_string(),
                    })
                });
            self
        }

        fn build(self) -> (InspectionService, ViolationService) {
            let violations = ViolationService::new(Arc::new(InMemoryRepository::new()));
            let service = InspectionService::new(
                violations.clone(),
                Arc::new(self.people),
                Arc::new(self.mup),
                Arc::new(self.court),
            );
            (service, violations)
        }
    }

    fn not_found(url: &str) -> ClientError {
        ClientError::Response {
            url: url.to_string(),
            method: Method::GET,
            status: StatusCode::NOT_FOUND,
        }
    }

    fn driver_check() -> DriverCheck {
        DriverCheck {
            subject: "p-1".to_string(),
            location: "Zrenjaninski put".to_string(),
        }
    }

    fn alcohol_test(level: f64) -> AlcoholTest {
        AlcoholTest {
            driver_email: "driver@example.com".to_string(),
            alcohol_level: level,
            location: "Novi Sad".to_string(),
        }
    }

    fn with_driver(mut mocks: Mocks) -> Mocks {
        mocks.people.expect_person_by_email().returning(|_, email, _| {
            Ok(Person {
                id: "p-1".to_string(),
                first_name: "Marko".to_string(),
                last_name: "Markovic".to_string(),
                email: email.to_string(),
            })
        });
        mocks
    }

    #[tokio::test]
    async fn test_alcohol_over_limit_is_reported() {
        let (service, violations) = with_driver(Mocks::new()).expect_reports(1).build();

        let outcome = service
            .alcohol(&Deadline::unbounded(), alcohol_test(0.456), "token")
            .await
            .unwrap();

        assert!(!outcome.passed);
        let violation = outcome.violation.unwrap();
        assert_eq!(violation.reason, "drunk driving: 0.46");
        assert_eq!(violation.violator, "p-1");
        assert_eq!(violations.list().await.unwrap(), vec![violation]);
    }

    #[tokio::test]
    async fn test_alcohol_at_limit_passes() {
        let (service, violations) = with_driver(Mocks::new()).expect_reports(0).build();

        let outcome = service
            .alcohol(&Deadline::unbounded(), alcohol_test(0.2), "token")
            .await
            .unwrap();
        assert_eq!(outcome, InspectionOutcome::passed());
        assert!(violations.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_alcohol_unknown_driver_is_upstream_error() {
        let mut mocks = Mocks::new().expect_reports(0);
        mocks
            .people
            .expect_person_by_email()
            .returning(|_, _, _| Err(not_found("http://identity/user/email/x")));
        let (service, _) = mocks.build();

        let result = service
            .alcohol(&Deadline::unbounded(), alcohol_test(0.5), "token")
            .await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_banned_driver_is_reported() {
        let mut mocks = Mocks::new().expect_reports(1);
        mocks
            .mup
            .expect_has_active_driving_ban()
            .returning(|_, _, _| Ok(true));
        let (service, _) = mocks.build();

        let outcome = service
            .driver_ban(&Deadline::unbounded(), driver_check(), "token")
            .await
            .unwrap();
        assert_eq!(outcome.violation.unwrap().reason, DRIVING_WHILE_BANNED);
    }

    #[tokio::test]
    async fn test_missing_permit_is_reported() {
        let mut mocks = Mocks::new().expect_reports(1);
        mocks
            .mup
            .expect_driving_permit_for()
            .returning(|_, _, _| Err(not_found("http://mup/check-for-persons-driving-permit/p-1")));
        let (service, _) = mocks.build();

        let outcome = service
            .driver_permit(&Deadline::unbounded(), driver_check(), "token")
            .await
            .unwrap();
        assert_eq!(outcome.violation.unwrap().reason, DRIVING_WITHOUT_PERMIT);
    }

    #[tokio::test]
    async fn test_approved_permit_passes() {
        let mut mocks = Mocks::new().expect_reports(0);
        mocks.mup.expect_driving_permit_for().returning(|_, subject, _| {
            Ok(TrafficPermit {
                id: "tp-1".to_string(),
                number: "AB12CD34".to_string(),
                subject: subject.to_string(),
                approved: true,
                issued_date: now(),
            })
        });
        let (service, _) = mocks.build();

        let outcome = service
            .driver_permit(&Deadline::unbounded(), driver_check(), "token")
            .await
            .unwrap();
        assert!(outcome.passed);
    }

    #[tokio::test]
    async fn test_permit_lookup_failure_propagates() {
        let mut mocks = Mocks::new().expect_reports(0);
        mocks.mup.expect_driving_permit_for().returning(|_, _, _| {
            Err(ClientError::Connecting {
                cause: "connection refused".to_string(),
            })
        });
        let (service, violations) = mocks.build();

        let result = service
            .driver_permit(&Deadline::unbounded(), driver_check(), "token")
            .await;
        assert!(matches!(
            result,
            Err(AppError::Upstream(ClientError::Connecting { .. }))
        ));
        assert!(violations.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expired_registration_is_reported() {
        let mut mocks = Mocks::new().expect_reports(1);
        mocks.mup.expect_registration_by_plate().returning(|_, plate, _| {
            Ok(VehicleRegistration {
                id: "r-1".to_string(),
                registration_number: "XY98ZW76".to_string(),
                vehicle_id: "veh-1".to_string(),
                subject: "p-1".to_string(),
                approved: true,
                issued_date: now() - Duration::days(2000),
                expiration_date: now() - Duration::days(1),
                plates: Some(plate.to_string()),
            })
        });
        let (service, _) = mocks.build();

        let outcome = service
            .vehicle_registration(
                &Deadline::unbounded(),
                VehicleCheck {
                    plate: "SRB-ab1-C2".to_string(),
                    subject: "p-1".to_string(),
                    location: "Novi Sad".to_string(),
                },
                "token",
            )
            .await
            .unwrap();
        assert_eq!(outcome.violation.unwrap().reason, UNREGISTERED_VEHICLE);
    }
}
