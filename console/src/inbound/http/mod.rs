//! HTTP inbound adapter serving the admin pages.

pub mod documents;
pub mod error;
pub mod health;
pub mod pages;
pub mod reports;
pub mod state;
pub mod users;
pub mod views;

pub use error::ApiResult;
