//! Driven adapters: persistence, notification fan-out, and token auth.

pub mod auth;
pub mod notify;
pub mod persistence;
