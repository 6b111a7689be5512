//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` so they only depend on
//! domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CallerAuthenticator, DonationIntake, RequestLifecycle};
use crate::outbound::notify::BroadcastHub;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub lifecycle: Arc<dyn RequestLifecycle>,
    pub donations: Arc<dyn DonationIntake>,
    pub auth: Arc<dyn CallerAuthenticator>,
    /// Fan-out point the WebSocket endpoint subscribes to; the lifecycle
    /// manager holds the same hub as its event sink.
    pub notifications: BroadcastHub,
}
