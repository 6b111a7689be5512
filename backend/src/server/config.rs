//! Server configuration read from the environment.

use std::env;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use tracing::warn;

const DEFAULT_PORT: u16 = 4000;

/// Bind and bootstrap settings for the HTTP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct with an explicit bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Read `PORT` from the environment, falling back to the default on
    /// absence or garbage.
    #[must_use]
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| match value.parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!(value, "ignoring unparseable PORT");
                    None
                }
            })
            .unwrap_or(DEFAULT_PORT);
        Self::new(SocketAddr::V4(SocketAddrV4::new(
            Ipv4Addr::UNSPECIFIED,
            port,
        )))
    }
}
