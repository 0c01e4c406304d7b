//! Traffic police client

use super::{ClientError, Deadline, ServiceClient};
use crate::api::SuccessResponse;
use crate::domain::TrafficViolation;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ViolationSource: Send + Sync {
    async fn traffic_violations(
        &self,
        deadline: &Deadline,
        token: &str,
    ) -> Result<Vec<TrafficViolation>, ClientError>;
}

#[derive(Clone)]
pub struct PoliceClient {
    client: ServiceClient,
}

impl PoliceClient {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ViolationSource for PoliceClient {
    async fn traffic_violations(
        &self,
        deadline: &Deadline,
        token: &str,
    ) -> Result<Vec<TrafficViolation>, ClientError> {
        let response: SuccessResponse<Vec<TrafficViolation>> = self
            .client
            .get(deadline, "/traffic-violation", token)
            .await?;
        Ok(response.data)
    }
}
