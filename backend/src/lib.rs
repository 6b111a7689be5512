//! LifeLink backend: blood/organ donor matching with an inventory-gated
//! request-approval workflow.
//!
//! The domain core owns the request status state machine, the derived
//! inventory ledger over donation records, and the notification contract.
//! Inbound HTTP adapters and the WebSocket fan-out sit at the edges.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod ws;

pub use doc::ApiDoc;
pub use middleware::Trace;
