//! Donation requests and their status state machine.
//!
//! The status enum is the whole machine: admins set a target status directly
//! and no ordering graph is enforced beyond the inventory gate on
//! [`RequestStatus::Approved`], which the lifecycle manager applies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::donation::{Need, NeedKind};
use crate::domain::user::UserId;

/// Unique request identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Mint a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RequestId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle status of a donation request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Verified,
    Approved,
    Matched,
    Completed,
    Rejected,
    Ignored,
}

/// Raised when a status string is outside the seven-value enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown request status `{value}`")]
pub struct UnknownStatusError {
    pub value: String,
}

impl RequestStatus {
    /// Every member of the enum, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Verified,
        Self::Approved,
        Self::Matched,
        Self::Completed,
        Self::Rejected,
        Self::Ignored,
    ];

    /// Wire representation (uppercase).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Verified => "VERIFIED",
            Self::Approved => "APPROVED",
            Self::Matched => "MATCHED",
            Self::Completed => "COMPLETED",
            Self::Rejected => "REJECTED",
            Self::Ignored => "IGNORED",
        }
    }

    /// Lowercase form used in recipient-facing notification messages.
    #[must_use]
    pub fn as_lowercase(&self) -> String {
        self.as_str().to_lowercase()
    }

    /// No further transitions are modelled out of these states.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected | Self::Ignored)
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatusError {
                value: s.to_owned(),
            })
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgently the recipient needs the match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    High,
    Emergency,
}

/// Raised when an urgency string is outside the enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown urgency `{value}`")]
pub struct UnknownUrgencyError {
    pub value: String,
}

impl Urgency {
    /// Wire representation (lowercase).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Emergency => "emergency",
        }
    }
}

impl std::str::FromStr for Urgency {
    type Err = UnknownUrgencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "emergency" => Ok(Self::Emergency),
            other => Err(UnknownUrgencyError {
                value: other.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for opening a request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRequest {
    pub requester_id: UserId,
    pub need: Need,
    pub radius_km: Option<f64>,
    pub urgency: Urgency,
    pub description: Option<String>,
    pub hospital_name: Option<String>,
    pub doctor_name: Option<String>,
    pub contact_phone: Option<String>,
}

/// A recipient's ask, mutated only by admin status transitions.
///
/// `radius_km` is stored but unused by the core matching logic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    pub id: RequestId,
    pub requester_id: UserId,
    #[serde(flatten)]
    pub need: Need,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,
    pub urgency: Urgency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DonationRequest {
    /// Open a new request in the initial `PENDING` state.
    #[must_use]
    pub fn open(new: NewRequest) -> Self {
        let now = Utc::now();
        Self {
            id: RequestId::new(),
            requester_id: new.requester_id,
            need: new.need,
            radius_km: new.radius_km,
            urgency: new.urgency,
            description: new.description,
            hospital_name: new.hospital_name,
            doctor_name: new.doctor_name,
            contact_phone: new.contact_phone,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Admin listing filters; `None` fields match everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
    pub urgency: Option<Urgency>,
    pub kind: Option<NeedKind>,
}

impl RequestFilter {
    /// Whether `request` passes every set filter.
    #[must_use]
    pub fn matches(&self, request: &DonationRequest) -> bool {
        self.status.is_none_or(|status| request.status == status)
            && self.urgency.is_none_or(|urgency| request.urgency == urgency)
            && self.kind.is_none_or(|kind| request.need.kind() == kind)
    }
}
