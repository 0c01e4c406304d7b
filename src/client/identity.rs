//! Identity directory client

use super::{ClientError, Deadline, ServiceClient};
use crate::api::SuccessResponse;
use crate::domain::Person;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    async fn person_by_id(
        &self,
        deadline: &Deadline,
        id: &str,
        token: &str,
    ) -> Result<Person, ClientError>;

    async fn person_by_email(
        &self,
        deadline: &Deadline,
        email: &str,
        token: &str,
    ) -> Result<Person, ClientError>;
}

#[derive(Clone)]
pub struct IdentityClient {
    client: ServiceClient,
}

impl IdentityClient {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PersonDirectory for IdentityClient {
    async fn person_by_id(
        &self,
        deadline: &Deadline,
        id: &str,
        token: &str,
    ) -> Result<Person, ClientError> {
        let path = format!("/user/{}", urlencoding::encode(id));
        let response: SuccessResponse<Person> = self.client.get(deadline, &path, token).await?;
        Ok(response.data)
    }

    async fn person_by_email(
        &self,
        deadline: &Deadline,
        email: &str,
        token: &str,
    ) -> Result<Person, ClientError> {
        let path = format!("/user/email/{}", urlencoding::encode(email));
        let response: SuccessResponse<Person> = self.client.get(deadline, &path, token).await?;
        Ok(response.data)
    }
}
