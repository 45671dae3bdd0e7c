//! User management workflows behind the admin users page.
//!
//! Each operation returns a complete [`UserManagementView`] describing what
//! the page shows after the operation: which listing is visible, any notice,
//! and the state of the create and edit forms. Views are built per request;
//! nothing is retained between requests.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{BackendError, UserDirectory};
use crate::domain::{
    CredentialsUpdate, DeleteOutcome, ModuleCredentials, NewUser, User, UserId, UserRole,
    UserValidationError,
};

/// Which set of users the page displays. Only one is ever visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UserListing {
    /// No listing, e.g. after a failed search.
    #[default]
    Hidden,
    /// The full list, in backend order.
    All(Vec<User>),
    /// A single search hit.
    Searched(User),
    /// The full list could not be loaded.
    LoadFailed(String),
}

/// Outcome message for the last mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Create-user form contents, echoed back when creation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserForm {
    pub username: String,
    pub password: String,
    /// Raw role selection; blank when none was submitted.
    pub role: String,
    pub credentials: ModuleCredentials,
}

impl Default for CreateUserForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            role: UserRole::default().as_str().to_owned(),
            credentials: ModuleCredentials::default(),
        }
    }
}

impl CreateUserForm {
    /// Validate presence of the required fields.
    ///
    /// # Errors
    ///
    /// [`UserValidationError::MissingRequiredFields`] when username, password
    /// or role is blank; [`UserValidationError::UnknownRole`] for a role
    /// outside the enumeration.
    pub fn to_new_user(&self) -> Result<NewUser, UserValidationError> {
        let role = if self.role.is_empty() {
            None
        } else {
            Some(self.role.parse::<UserRole>()?)
        };
        NewUser::try_new(
            &self.username,
            &self.password,
            role,
            self.credentials.clone(),
        )
    }
}

/// Credential edit form for one account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditCredentialsForm {
    pub username: String,
    /// Never echoed back to the page.
    pub new_password: String,
    pub credentials: ModuleCredentials,
}

impl EditCredentialsForm {
    /// Pre-fill from the current record with a blank password.
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username().to_owned(),
            new_password: String::new(),
            credentials: user.credentials().clone(),
        }
    }

    pub fn to_update(&self) -> CredentialsUpdate {
        CredentialsUpdate::new(
            self.username.clone(),
            Some(self.new_password.clone()),
            self.credentials.clone(),
        )
    }

    /// Copy suitable for re-rendering, with the password cleared.
    fn redacted(mut self) -> Self {
        self.new_password.clear();
        self
    }
}

/// Everything the users page renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserManagementView {
    pub listing: UserListing,
    pub search_username: String,
    pub search_error: Option<String>,
    pub notice: Option<Notice>,
    pub create_form: CreateUserForm,
    pub editing: Option<EditCredentialsForm>,
}

/// Orchestrates user administration against a [`UserDirectory`].
#[derive(Clone)]
pub struct UserManagementService {
    directory: Arc<dyn UserDirectory>,
}

impl UserManagementService {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Load the full list, clearing any search result.
    pub async fn show_all(&self) -> UserManagementView {
        UserManagementView {
            listing: self.load_listing().await,
            ..UserManagementView::default()
        }
    }

    /// Look up one account by username, hiding the full list.
    ///
    /// A blank username is rejected without calling the backend.
    pub async fn search(&self, username: &str) -> UserManagementView {
        let mut view = UserManagementView {
            search_username: username.to_owned(),
            ..UserManagementView::default()
        };
        let trimmed = username.trim();
        if trimmed.is_empty() {
            view.search_error = Some(UserValidationError::EmptyUsername.to_string());
            return view;
        }

        match self.directory.find_user(trimmed).await {
            Ok(Some(user)) => view.listing = UserListing::Searched(user),
            Ok(None) => view.search_error = Some(format!("User \"{username}\" not found.")),
            Err(err) => {
                warn!(error = %err, "user search failed");
                view.search_error = Some(err.to_string());
            }
        }
        view
    }

    /// Create an account and refresh the list.
    ///
    /// Validation failures return without any backend call and keep the
    /// submitted values; backend failures keep them too.
    pub async fn create_user(&self, form: CreateUserForm) -> UserManagementView {
        let draft = match form.to_new_user() {
            Ok(draft) => draft,
            Err(err) => {
                return UserManagementView {
                    notice: Some(Notice::Error(err.to_string())),
                    create_form: form,
                    ..UserManagementView::default()
                };
            }
        };

        match self.directory.create_user(&draft).await {
            Ok(()) => {
                debug!(username = draft.username(), "user created");
                UserManagementView {
                    listing: self.load_listing().await,
                    notice: Some(Notice::Success(format!(
                        "User {} created successfully!",
                        draft.username()
                    ))),
                    ..UserManagementView::default()
                }
            }
            Err(err) => {
                warn!(error = %err, username = draft.username(), "user creation failed");
                UserManagementView {
                    listing: self.load_listing().await,
                    notice: Some(Notice::Error(err.to_string())),
                    create_form: form,
                    ..UserManagementView::default()
                }
            }
        }
    }

    /// Open the credential edit form pre-filled from the current record.
    pub async fn begin_edit(&self, username: &str) -> UserManagementView {
        let found = self.directory.find_user(username).await;
        let mut view = self.show_all().await;
        match found {
            Ok(Some(user)) => view.editing = Some(EditCredentialsForm::from_user(&user)),
            Ok(None) => {
                view.notice = Some(Notice::Error(format!("User \"{username}\" not found.")));
            }
            Err(err) => view.notice = Some(Notice::Error(err.to_string())),
        }
        view
    }

    /// Submit a credential update and refresh the list.
    ///
    /// On failure the edit form stays open, minus the typed password.
    pub async fn update_credentials(&self, form: EditCredentialsForm) -> UserManagementView {
        let update = form.to_update();
        let result = self.directory.update_credentials(&update).await;
        let mut view = self.show_all().await;
        match result {
            Ok(()) => {
                debug!(username = update.username(), "credentials updated");
                view.notice = Some(Notice::Success(format!(
                    "Credentials for user {} updated successfully!",
                    update.username()
                )));
            }
            Err(err) => {
                warn!(error = %err, username = update.username(), "credential update failed");
                view.notice = Some(Notice::Error(err.to_string()));
                view.editing = Some(form.redacted());
            }
        }
        view
    }

    /// Delete an account; a missing account reads the same as a deleted one.
    pub async fn delete_user(&self, id: UserId, username: &str) -> UserManagementView {
        let result = self.directory.delete_user(id).await;
        let mut view = self.show_all().await;
        view.notice = Some(match result {
            Ok(outcome) => {
                if outcome == DeleteOutcome::NotFound {
                    debug!(%id, "delete target already absent");
                }
                Notice::Success(format!(
                    "User {username} deleted successfully (or was not found)."
                ))
            }
            Err(err) => {
                warn!(error = %err, %id, "user deletion failed");
                Notice::Error(err.to_string())
            }
        });
        view
    }

    async fn load_listing(&self) -> UserListing {
        match self.directory.list_users().await {
            Ok(users) => UserListing::All(users),
            Err(err) => {
                warn!(error = %err, "listing users failed");
                UserListing::LoadFailed(listing_error(&err))
            }
        }
    }
}

fn listing_error(err: &BackendError) -> String {
    format!("Error fetching users: {err}")
}

#[cfg(test)]
#[path = "user_management_tests.rs"]
mod tests;
