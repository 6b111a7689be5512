//! Domain core: entities, ports, and the matching/lifecycle services.
//!
//! Everything here is transport agnostic. Inbound adapters translate HTTP
//! into these types; outbound adapters implement the driven ports.

pub mod donation;
pub mod error;
pub mod events;
pub mod intake;
pub mod inventory;
pub mod lifecycle;
pub mod ports;
pub mod request;
pub mod user;

pub use self::donation::{Donation, DonationId, Need, NeedKind, NeedValidationError, NewDonation};
pub use self::error::{Error, ErrorCode};
pub use self::events::Notification;
pub use self::intake::DonationService;
pub use self::inventory::InventoryLedger;
pub use self::lifecycle::LifecycleManager;
pub use self::request::{
    DonationRequest, NewRequest, RequestFilter, RequestId, RequestStatus, UnknownStatusError,
    Urgency,
};
pub use self::user::{Availability, Role, User, UserId};
