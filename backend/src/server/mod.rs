//! Application wiring shared by the binary and the integration tests.

pub mod config;

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::CallerAuthenticator;
use crate::domain::{DonationService, LifecycleManager};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{admin, donors, health, requests};
use crate::outbound::notify::BroadcastHub;
use crate::outbound::persistence::{
    InMemoryDonationRepository, InMemoryRequestRepository, InMemoryUserRepository,
};
use crate::ws;

pub use config::ServerConfig;

/// Bundle of the in-memory stores behind a built state, exposed so callers
/// (the binary, tests) can seed data directly.
pub struct Stores {
    pub requests: Arc<InMemoryRequestRepository>,
    pub donations: Arc<InMemoryDonationRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

/// Build an [`HttpState`] over fresh in-memory stores.
pub fn in_memory_state(auth: Arc<dyn CallerAuthenticator>) -> (HttpState, Stores) {
    let requests = Arc::new(InMemoryRequestRepository::default());
    let donations = Arc::new(InMemoryDonationRepository::default());
    let users = Arc::new(InMemoryUserRepository::default());
    let hub = BroadcastHub::default();

    let lifecycle = LifecycleManager::new(
        Arc::clone(&requests),
        Arc::clone(&donations),
        Arc::new(hub.clone()),
    );
    let intake = DonationService::new(Arc::clone(&donations), Arc::clone(&users));

    let state = HttpState {
        lifecycle: Arc::new(lifecycle),
        donations: Arc::new(intake),
        auth,
        notifications: hub,
    };
    let stores = Stores {
        requests,
        donations,
        users,
    };
    (state, stores)
}

/// Register the application state and every route on an Actix app.
pub fn app_config(state: web::Data<HttpState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(state)
            .service(health::health)
            .service(requests::create_request)
            .service(requests::list_own_requests)
            .service(donors::create_donation)
            .service(donors::list_own_donations)
            .service(donors::set_availability)
            .service(admin::list_requests)
            .service(admin::inventory_check)
            .service(admin::set_request_status)
            .service(admin::notify_unavailable)
            .service(ws::notifications);
    }
}
