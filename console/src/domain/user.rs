//! User accounts administered through the console.
//!
//! The backend owns persistence and authoritative validation; the types here
//! only enforce what the console checks before dispatching a request: required
//! fields are present and roles come from the fixed enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Validation errors raised before a user request leaves the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Create-user submitted without username, password, or role.
    MissingRequiredFields,
    /// Username search or edit target was blank.
    EmptyUsername,
    /// Role string outside the fixed enumeration.
    UnknownRole(String),
    /// Identifier was not a base-10 integer.
    InvalidId(String),
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequiredFields => {
                write!(f, "Username, password, and role are required.")
            }
            Self::EmptyUsername => write!(f, "Please enter a username to search."),
            Self::UnknownRole(role) => write!(f, "unknown role: {role}"),
            Self::InvalidId(raw) => write!(f, "user id must be an integer, got {raw:?}"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Backend-assigned numeric user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId(s.to_owned()))
    }
}

/// Role assigned to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Client account for the hospital module.
    #[default]
    ModuleHospital,
    /// Client account for the pharmacy module.
    ModulePharmacy,
    /// Client account for the insurance module.
    ModuleInsurance,
    /// Console operator.
    Administrator,
}

impl UserRole {
    /// Every role, in the order the create form offers them.
    pub const ALL: [Self; 4] = [
        Self::ModuleHospital,
        Self::ModulePharmacy,
        Self::ModuleInsurance,
        Self::Administrator,
    ];

    /// Wire representation used by the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModuleHospital => "MODULE_HOSPITAL",
            Self::ModulePharmacy => "MODULE_PHARMACY",
            Self::ModuleInsurance => "MODULE_INSURANCE",
            Self::Administrator => "ADMINISTRATOR",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UserValidationError::UnknownRole(s.to_owned()))
    }
}

/// Client category a non-admin account is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModuleRole {
    /// Hospital module.
    #[default]
    Hospital,
    /// Pharmacy module.
    Pharmacy,
    /// Insurance module.
    Insurance,
}

impl ModuleRole {
    /// Every module role, in display order.
    pub const ALL: [Self; 3] = [Self::Hospital, Self::Pharmacy, Self::Insurance];

    /// Wire representation shared with [`UserRole`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        UserRole::from_module(self).as_str()
    }
}

impl UserRole {
    /// Account role corresponding to a module.
    #[must_use]
    pub const fn from_module(module: ModuleRole) -> Self {
        match module {
            ModuleRole::Hospital => Self::ModuleHospital,
            ModuleRole::Pharmacy => Self::ModulePharmacy,
            ModuleRole::Insurance => Self::ModuleInsurance,
        }
    }
}

impl fmt::Display for ModuleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleRole {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|module| module.as_str() == s)
            .ok_or_else(|| UserValidationError::UnknownRole(s.to_owned()))
    }
}

/// Free-text credentials a user presents to each client module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleCredentials {
    /// Hospital service credentials.
    pub hospital: String,
    /// Pharmacy service credentials.
    pub pharmacy: String,
    /// Insurance service credentials.
    pub insurance: String,
}

/// Account as reported by the user-administration service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    role: UserRole,
    admin_creator: bool,
    credentials: ModuleCredentials,
}

impl User {
    /// Assemble a user from backend-provided parts.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        role: UserRole,
        admin_creator: bool,
        credentials: ModuleCredentials,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            role,
            admin_creator,
            credentials,
        }
    }

    /// Backend identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Assigned role.
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Whether an administrator provisioned the account.
    pub fn admin_creator(&self) -> bool {
        self.admin_creator
    }

    /// Per-module credentials on record.
    pub fn credentials(&self) -> &ModuleCredentials {
        &self.credentials
    }
}

/// Validated create-user request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: String,
    password: String,
    role: UserRole,
    credentials: ModuleCredentials,
}

impl NewUser {
    /// Check presence of the required fields.
    ///
    /// # Examples
    /// ```
    /// use console::domain::{ModuleCredentials, NewUser, UserRole};
    ///
    /// let credentials = ModuleCredentials::default();
    /// let draft = NewUser::try_new("clinic", "", Some(UserRole::ModuleHospital), credentials);
    /// assert!(draft.is_err());
    /// ```
    pub fn try_new(
        username: &str,
        password: &str,
        role: Option<UserRole>,
        credentials: ModuleCredentials,
    ) -> Result<Self, UserValidationError> {
        let Some(role) = role else {
            return Err(UserValidationError::MissingRequiredFields);
        };
        if username.is_empty() || password.is_empty() {
            return Err(UserValidationError::MissingRequiredFields);
        }
        Ok(Self {
            username: username.to_owned(),
            password: password.to_owned(),
            role,
            credentials,
        })
    }

    /// Requested login name.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Initial password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Requested role.
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Initial per-module credentials.
    pub fn credentials(&self) -> &ModuleCredentials {
        &self.credentials
    }
}

/// Credential update for an existing account.
///
/// A blank password is normalised to `None` so the backend keeps the current
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsUpdate {
    username: String,
    new_password: Option<String>,
    credentials: ModuleCredentials,
}

impl CredentialsUpdate {
    /// Build an update, dropping a blank password.
    pub fn new(
        username: impl Into<String>,
        new_password: Option<String>,
        credentials: ModuleCredentials,
    ) -> Self {
        Self {
            username: username.into(),
            new_password: new_password.filter(|password| !password.is_empty()),
            credentials,
        }
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Replacement password, absent when the existing one is kept.
    pub fn new_password(&self) -> Option<&str> {
        self.new_password.as_deref()
    }

    pub fn credentials(&self) -> &ModuleCredentials {
        &self.credentials
    }
}

/// Outcome of a delete call that the console treats as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The backend removed the account.
    Deleted,
    /// The backend had no such account.
    NotFound,
}
