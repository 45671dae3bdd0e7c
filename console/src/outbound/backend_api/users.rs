//! `UserDirectory` over the backend's `/users` resource.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use super::client::BackendApiClient;
use super::dto::{CreateUserRequestDto, UpdateCredentialsRequestDto, UserDto};
use crate::domain::ports::{BackendError, UserDirectory};
use crate::domain::{CredentialsUpdate, DeleteOutcome, NewUser, User, UserId};

#[async_trait]
impl UserDirectory for BackendApiClient {
    async fn list_users(&self) -> Result<Vec<User>, BackendError> {
        let url = self.endpoint(["users"])?;
        let response = self.send::<()>(Method::GET, url, None).await?.into_success()?;
        response
            .decode::<Vec<UserDto>>()?
            .into_iter()
            .map(|dto| dto.into_domain().map_err(BackendError::decode))
            .collect()
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, BackendError> {
        let url = self.endpoint(["users", username])?;
        let response = self.send::<()>(Method::GET, url, None).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let dto = response.into_success()?.decode::<UserDto>()?;
        dto.into_domain().map(Some).map_err(BackendError::decode)
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), BackendError> {
        let url = self.endpoint(["users"])?;
        let body = CreateUserRequestDto::from(user);
        self.send(Method::POST, url, Some(&body))
            .await?
            .into_success()
            .map(drop)
    }

    async fn update_credentials(&self, update: &CredentialsUpdate) -> Result<(), BackendError> {
        let url = self.endpoint(["users", update.username(), "credentials"])?;
        let body = UpdateCredentialsRequestDto::from(update);
        self.send(Method::PUT, url, Some(&body))
            .await?
            .into_success()
            .map(drop)
    }

    async fn delete_user(&self, id: UserId) -> Result<DeleteOutcome, BackendError> {
        let raw_id = id.to_string();
        let url = self.endpoint(["users", raw_id.as_str()])?;
        let response = self.send::<()>(Method::DELETE, url, None).await?;
        match response.status {
            StatusCode::NOT_FOUND => Ok(DeleteOutcome::NotFound),
            status if status.is_success() => Ok(DeleteOutcome::Deleted),
            _ => Err(response.into_rejection()),
        }
    }
}
