//! Response DTOs shared across the HTTP handlers.
//!
//! Entities serialize their own wire shape for notification payloads; the
//! HTTP surface goes through these DTOs so the OpenAPI document and the
//! JSON contract stay explicit.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::donation::Donation;
use crate::domain::request::DonationRequest;
use crate::domain::user::Availability;

/// A donation request as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    pub id: String,
    pub requester_id: String,
    #[serde(rename = "type")]
    #[schema(example = "blood")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "O+")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "kidney")]
    pub organ: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,
    #[schema(example = "high")]
    pub urgency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[schema(example = "PENDING")]
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<DonationRequest> for RequestResponse {
    fn from(value: DonationRequest) -> Self {
        Self {
            id: value.id.to_string(),
            requester_id: value.requester_id.to_string(),
            kind: value.need.kind().to_string(),
            blood_type: value.need.blood_type().map(str::to_owned),
            organ: value.need.organ_name().map(str::to_owned),
            radius_km: value.radius_km,
            urgency: value.urgency.to_string(),
            description: value.description,
            hospital_name: value.hospital_name,
            doctor_name: value.doctor_name,
            contact_phone: value.contact_phone,
            status: value.status.to_string(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// A donation record as returned to its donor.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponse {
    pub id: String,
    pub donor_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organ: Option<String>,
    #[schema(example = "2026-06-01")]
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<Donation> for DonationResponse {
    fn from(value: Donation) -> Self {
        Self {
            id: value.id.to_string(),
            donor_id: value.donor_id.to_string(),
            kind: value.need.kind().to_string(),
            blood_type: value.need.blood_type().map(str::to_owned),
            organ: value.need.organ_name().map(str::to_owned),
            date: value.date.to_string(),
            address: value.address,
            notes: value.notes,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Donor availability as returned after an update.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub availability: Availability,
}

/// Bare acknowledgement body.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct Ack {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::donation::Need;
    use crate::domain::request::{NewRequest, Urgency};
    use crate::domain::user::UserId;
    use rstest::rstest;

    #[rstest]
    fn request_response_splits_the_need_by_kind() {
        let request = DonationRequest::open(NewRequest {
            requester_id: UserId::new(),
            need: Need::organ("liver").expect("valid"),
            radius_km: None,
            urgency: Urgency::Low,
            description: None,
            hospital_name: None,
            doctor_name: None,
            contact_phone: None,
        });

        let response = RequestResponse::from(request);
        assert_eq!(response.kind, "organ");
        assert_eq!(response.organ.as_deref(), Some("liver"));
        assert_eq!(response.blood_type, None);
        assert_eq!(response.status, "PENDING");
    }
}
