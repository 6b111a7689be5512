//! Inbound HTTP adapter: handlers, DTOs, auth, and error mapping.

pub mod admin;
pub mod auth;
pub mod donors;
pub mod error;
pub mod health;
pub mod requests;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::{ApiError, ApiResult};
pub use state::HttpState;
