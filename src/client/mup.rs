//! MUP (vehicle and driving authority) client

use super::{ClientError, Deadline, ServiceClient};
use crate::api::SuccessResponse;
use crate::domain::{
    DrivingBan, DrivingBanStatus, NewDrivingBan, TrafficPermit, Vehicle, VehicleRegistration,
};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};

/// Receiver of driving bans derived from suspensions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DrivingBanNotifier: Send + Sync {
    /// Create one ban record. Succeeds only on `201 Created`.
    async fn issue_driving_ban(
        &self,
        deadline: &Deadline,
        ban: &NewDrivingBan,
        token: &str,
    ) -> Result<DrivingBan, ClientError>;
}

/// Read side of MUP used by roadside checks and statistics
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MupRegistry: Send + Sync {
    async fn has_active_driving_ban(
        &self,
        deadline: &Deadline,
        subject: &str,
        token: &str,
    ) -> Result<bool, ClientError>;

    async fn driving_permit_for(
        &self,
        deadline: &Deadline,
        subject: &str,
        token: &str,
    ) -> Result<TrafficPermit, ClientError>;

    async fn registration_by_plate(
        &self,
        deadline: &Deadline,
        plate: &str,
        token: &str,
    ) -> Result<VehicleRegistration, ClientError>;

    async fn registered_vehicles(
        &self,
        deadline: &Deadline,
        token: &str,
    ) -> Result<Vec<Vehicle>, ClientError>;
}

#[derive(Clone)]
pub struct MupClient {
    client: ServiceClient,
}

impl MupClient {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DrivingBanNotifier for MupClient {
    async fn issue_driving_ban(
        &self,
        deadline: &Deadline,
        ban: &NewDrivingBan,
        token: &str,
    ) -> Result<DrivingBan, ClientError> {
        let response: SuccessResponse<DrivingBan> = self
            .client
            .call(
                deadline,
                Method::POST,
                "/driving-ban",
                Some(ban),
                token,
                StatusCode::CREATED,
            )
            .await?;
        Ok(response.data)
    }
}

#[async_trait]
impl MupRegistry for MupClient {
    async fn has_active_driving_ban(
        &self,
        deadline: &Deadline,
        subject: &str,
        token: &str,
    ) -> Result<bool, ClientError> {
        let path = format!(
            "/check-persons-driving-ban/{}",
            urlencoding::encode(subject)
        );
        let response: SuccessResponse<DrivingBanStatus> =
            self.client.get(deadline, &path, token).await?;
        Ok(response.data.driving_ban)
    }

    async fn driving_permit_for(
        &self,
        deadline: &Deadline,
        subject: &str,
        token: &str,
    ) -> Result<TrafficPermit, ClientError> {
        let path = format!(
            "/check-for-persons-driving-permit/{}",
            urlencoding::encode(subject)
        );
        let response: SuccessResponse<TrafficPermit> =
            self.client.get(deadline, &path, token).await?;
        Ok(response.data)
    }

    async fn registration_by_plate(
        &self,
        deadline: &Deadline,
        plate: &str,
        token: &str,
    ) -> Result<VehicleRegistration, ClientError> {
        let path = format!("/registration-by-plate/{}", urlencoding::encode(plate));
        let response: SuccessResponse<VehicleRegistration> =
            self.client.get(deadline, &path, token).await?;
        Ok(response.data)
    }

    async fn registered_vehicles(
        &self,
        deadline: &Deadline,
        token: &str,
    ) -> Result<Vec<Vehicle>, ClientError> {
        let response: SuccessResponse<Vec<Vehicle>> = self
            .client
            .get(deadline, "/registered-vehicles", token)
            .await?;
        Ok(response.data)
    }
}
