//! Driven port for the backend's user-administration resource.

use async_trait::async_trait;

use super::BackendError;
use crate::domain::{CredentialsUpdate, DeleteOutcome, NewUser, User, UserId};

/// Port for listing and mutating backend user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every account known to the backend, in backend order.
    async fn list_users(&self) -> Result<Vec<User>, BackendError>;

    /// Look up one account; `Ok(None)` when the backend reports it missing.
    async fn find_user(&self, username: &str) -> Result<Option<User>, BackendError>;

    /// Create an account.
    async fn create_user(&self, user: &NewUser) -> Result<(), BackendError>;

    /// Replace an account's password (when supplied) and module credentials.
    async fn update_credentials(&self, update: &CredentialsUpdate) -> Result<(), BackendError>;

    /// Delete an account. A missing account is not an error.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use console::domain::{DeleteOutcome, UserId};
    /// use console::domain::ports::{FixtureUserDirectory, UserDirectory};
    ///
    /// let outcome = FixtureUserDirectory.delete_user(UserId::new(7)).await?;
    /// assert_eq!(outcome, DeleteOutcome::NotFound);
    /// # Ok::<(), console::domain::ports::BackendError>(())
    /// ```
    async fn delete_user(&self, id: UserId) -> Result<DeleteOutcome, BackendError>;
}

/// Fixture directory with no accounts that accepts every mutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn list_users(&self) -> Result<Vec<User>, BackendError> {
        Ok(Vec::new())
    }

    async fn find_user(&self, _username: &str) -> Result<Option<User>, BackendError> {
        Ok(None)
    }

    async fn create_user(&self, _user: &NewUser) -> Result<(), BackendError> {
        Ok(())
    }

    async fn update_credentials(&self, _update: &CredentialsUpdate) -> Result<(), BackendError> {
        Ok(())
    }

    async fn delete_user(&self, _id: UserId) -> Result<DeleteOutcome, BackendError> {
        Ok(DeleteOutcome::NotFound)
    }
}
