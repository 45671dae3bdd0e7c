//! Recording port doubles for the admin console scenarios.

use std::sync::Mutex;

use async_trait::async_trait;
use console::domain::ports::{BackendError, ReportSource, UserDirectory};
use console::domain::{
    CredentialsUpdate, DeleteOutcome, NewUser, ReportQuery, ReportRow, User, UserId,
};

/// Directory that serves a fixed user list and records every call.
#[derive(Default)]
pub struct RecordingDirectory {
    users: Mutex<Vec<User>>,
    missing_ids: Mutex<Vec<UserId>>,
    calls: Mutex<Vec<String>>,
}

impl RecordingDirectory {
    pub fn add_user(&self, user: User) {
        self.users.lock().expect("users mutex").push(user);
    }

    pub fn mark_missing(&self, id: UserId) {
        self.missing_ids.lock().expect("missing mutex").push(id);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls mutex").push(call);
    }
}

#[async_trait]
impl UserDirectory for RecordingDirectory {
    async fn list_users(&self) -> Result<Vec<User>, BackendError> {
        self.record("list_users".to_owned());
        Ok(self.users.lock().expect("users mutex").clone())
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, BackendError> {
        self.record(format!("find_user:{username}"));
        Ok(self
            .users
            .lock()
            .expect("users mutex")
            .iter()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), BackendError> {
        self.record(format!("create_user:{}", user.username()));
        Ok(())
    }

    async fn update_credentials(&self, update: &CredentialsUpdate) -> Result<(), BackendError> {
        self.record(format!("update_credentials:{}", update.username()));
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> Result<DeleteOutcome, BackendError> {
        self.record(format!("delete_user:{id}"));
        if self.missing_ids.lock().expect("missing mutex").contains(&id) {
            Ok(DeleteOutcome::NotFound)
        } else {
            Ok(DeleteOutcome::Deleted)
        }
    }
}

/// Scripted answer for the next report query.
#[derive(Debug, Clone, Default)]
pub enum ReportAnswer {
    /// The backend answered 204.
    #[default]
    NoContent,
    /// The backend answered with these rows.
    Rows(Vec<ReportRow>),
    /// The call failed.
    Failure(BackendError),
}

/// Report source that answers from a script and records each query.
#[derive(Default)]
pub struct RecordingReports {
    answer: Mutex<Option<ReportAnswer>>,
    queries: Mutex<Vec<ReportQuery>>,
}

impl RecordingReports {
    pub fn answer_with(&self, answer: ReportAnswer) {
        self.answer.lock().expect("answer mutex").replace(answer);
    }

    pub fn queries(&self) -> Vec<ReportQuery> {
        self.queries.lock().expect("queries mutex").clone()
    }
}

#[async_trait]
impl ReportSource for RecordingReports {
    async fn fetch_report(&self, query: &ReportQuery) -> Result<Vec<ReportRow>, BackendError> {
        self.queries
            .lock()
            .expect("queries mutex")
            .push(query.clone());
        let answer = self.answer.lock().expect("answer mutex").clone();
        match answer {
            Some(ReportAnswer::NoContent) => Ok(Vec::new()),
            Some(ReportAnswer::Rows(rows)) => Ok(rows),
            Some(ReportAnswer::Failure(err)) => Err(err),
            None => Err(BackendError::invalid_request(
                "report answer was not scripted",
            )),
        }
    }
}
