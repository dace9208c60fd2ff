//! Shared library for the Daily Assignment Publisher Lambda functions.
//!
//! This crate provides the record model, the key-value store adapter, and
//! common HTTP/config/error utilities used by the API handlers.

pub mod config;
pub mod date;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod secrets;
pub mod store;

pub use config::Config;
pub use date::{format_date, is_valid_date};
pub use error::{Error, Result};
pub use http::{error_response, json_response, preflight_response};
pub use models::{ApiResponse, Assignment, ListResponse, PutAssignmentRequest};
pub use secrets::{get_database_credentials, get_secret, DatabaseCredentials};
pub use store::AssignmentStore;
