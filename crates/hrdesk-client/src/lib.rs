//! hrdesk REST client
//!
//! Typed async access to the HR server: employees, skills, resume upload,
//! departments, the manager session, projects and the manager skill catalog.
//!
//! ## Error model
//!
//! Every call returns [`ApiError`]: network failures, non-2xx statuses, and
//! `{ "error": ... }` bodies delivered with a 2xx status are all errors.
//! Nothing is retried.

#![deny(unsafe_code, unused_imports, unused_variables)]

pub mod client;
pub mod config;
pub mod employees;
pub mod error;
pub mod manager;
pub mod projects;
pub mod store;

pub use client::HrClient;
pub use config::ClientConfig;
pub use employees::RESUME_FIELD;
pub use error::{ApiError, Result};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{ApiError, ClientConfig, HrClient};
}
