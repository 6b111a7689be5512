//! Backend entry-point: wires stores, the notification hub, and the HTTP
//! surface.

use std::env;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use lifelink_backend::Trace;
use lifelink_backend::domain::user::Role;
use lifelink_backend::outbound::auth::StaticTokenAuthenticator;
use lifelink_backend::server::{self, ServerConfig};

/// Environment variables provisioning one bearer token per role. Login and
/// registration live outside this service.
const TOKEN_VARS: [(&str, Role); 3] = [
    ("LIFELINK_ADMIN_TOKEN", Role::Admin),
    ("LIFELINK_DONOR_TOKEN", Role::Donor),
    ("LIFELINK_RECIPIENT_TOKEN", Role::Recipient),
];

fn authenticator_from_env() -> StaticTokenAuthenticator {
    let mut authenticator = StaticTokenAuthenticator::new();
    for (var, role) in TOKEN_VARS {
        match env::var(var) {
            Ok(token) if !token.trim().is_empty() => {
                let id = authenticator.add_token(token, role);
                info!(%role, user_id = %id, "provisioned bearer token from {var}");
            }
            _ => warn!(%role, "no bearer token provisioned ({var} unset)"),
        }
    }
    authenticator
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env();
    let (state, _stores) = server::in_memory_state(Arc::new(authenticator_from_env()));
    let state = web::Data::new(state);

    info!(addr = %config.bind_addr, "starting lifelink backend");
    HttpServer::new(move || {
        App::new()
            .wrap(Trace)
            .configure(server::app_config(state.clone()))
    })
    .bind(config.bind_addr)?
    .run()
    .await
}
