//! Notification events emitted by the request lifecycle.
//!
//! Events stay transport agnostic; the WebSocket adapter wraps them in a
//! `{"event": ..., "payload": ...}` envelope without re-encoding domain
//! logic. Delivery is advisory: dropping an event never affects the state
//! transition that produced it.

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::donation::NeedKind;
use crate::domain::request::{DonationRequest, RequestId, RequestStatus, Urgency};
use crate::domain::user::UserId;

/// Payload for `request:status`: a request moved to a new status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChanged {
    pub id: RequestId,
    pub status: RequestStatus,
    pub recipient_id: UserId,
    pub message: String,
}

/// Payload for `request:approved`: inventory is about to be consumed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Approved {
    pub request_id: RequestId,
    #[serde(rename = "type")]
    pub kind: NeedKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organ: Option<String>,
    pub urgency: Urgency,
}

/// Payload for `request:unavailable`: no donors for this request right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Unavailable {
    pub id: RequestId,
    pub recipient_id: UserId,
    pub message: String,
}

/// Typed notification events, one per wire event kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Notification {
    /// `request:new`: a recipient opened a request; carries the full record.
    New(DonationRequest),
    /// `request:status`: an admin moved a request to a new status.
    Status(StatusChanged),
    /// `request:approved`: emitted after `request:status` on approval.
    Approved(Approved),
    /// `request:unavailable`: advisory, no state change.
    Unavailable(Unavailable),
}

impl Notification {
    /// Wire event name.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::New(_) => "request:new",
            Self::Status(_) => "request:status",
            Self::Approved(_) => "request:approved",
            Self::Unavailable(_) => "request:unavailable",
        }
    }

    /// Envelope handed to notification adapters.
    #[must_use]
    pub fn envelope(&self) -> Value {
        json!({
            "event": self.kind(),
            "payload": self,
        })
    }
}
