//! Domain primitives, ports and page workflows.
//!
//! Purpose: model the accounts and report queries the console administers,
//! and the workflows that turn operator input into backend calls. Adapters
//! live outside this module and reach the backend only through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - User, NewUser, CredentialsUpdate: account model and mutations.
//! - ReportForm, ReportQuery, ReportRow: report input, query and results.
//! - UserManagementService, ReportsService: page workflows.

pub mod error;
pub mod ports;
pub mod report;
pub mod reports;
pub mod trace_id;
pub mod user;
pub mod user_management;

pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::report::{
    DateBounds, ReportCriteria, ReportForm, ReportKind, ReportQuery, ReportRow,
    ReportValidationError,
};
pub use self::reports::{ReportOutcome, ReportsService, ReportsView};
pub use self::trace_id::TraceId;
pub use self::user::{
    CredentialsUpdate, DeleteOutcome, ModuleCredentials, ModuleRole, NewUser, User, UserId,
    UserRole, UserValidationError,
};
pub use self::user_management::{
    CreateUserForm, EditCredentialsForm, Notice, UserListing, UserManagementService,
    UserManagementView,
};
