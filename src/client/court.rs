//! Court service client

use super::{ClientError, Deadline, ServiceClient};
use crate::api::SuccessResponse;
use crate::domain::{CrimeReportReceipt, TrafficViolation, Warrant};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};

/// Warrant lookup used by the permit and registration gate
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarrantLookup: Send + Sync {
    /// Warrants issued for `subject`; empty when there are none.
    async fn warrants_for(
        &self,
        deadline: &Deadline,
        subject: &str,
        token: &str,
    ) -> Result<Vec<Warrant>, ClientError>;
}

/// Destination of crime reports filed by the police
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CrimeReportSink: Send + Sync {
    async fn submit_crime_report(
        &self,
        deadline: &Deadline,
        violation: &TrafficViolation,
        token: &str,
    ) -> Result<CrimeReportReceipt, ClientError>;
}

#[derive(Clone)]
pub struct CourtClient {
    client: ServiceClient,
}

impl CourtClient {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WarrantLookup for CourtClient {
    async fn warrants_for(
        &self,
        deadline: &Deadline,
        subject: &str,
        token: &str,
    ) -> Result<Vec<Warrant>, ClientError> {
        let path = format!("/warrants/{}", urlencoding::encode(subject));
        let response: SuccessResponse<Vec<Warrant>> =
            self.client.get(deadline, &path, token).await?;
        Ok(response.data)
    }
}

#[async_trait]
impl CrimeReportSink for CourtClient {
    async fn submit_crime_report(
        &self,
        deadline: &Deadline,
        violation: &TrafficViolation,
        token: &str,
    ) -> Result<CrimeReportReceipt, ClientError> {
        let response: SuccessResponse<CrimeReportReceipt> = self
            .client
            .call(
                deadline,
                Method::POST,
                "/crime-report",
                Some(violation),
                token,
                StatusCode::OK,
            )
            .await?;
        Ok(response.data)
    }
}
