//! Donor-facing supply endpoints.
//!
//! ```text
//! POST /donor/donations
//! GET  /donor/donations
//! POST /donor/availability
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::donation::NewDonation;
use crate::domain::user::{Availability, Role};
use crate::inbound::http::auth::Identity;
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::schemas::{AvailabilityResponse, DonationResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_date, parse_need};

/// Payload for recording a donation.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationBody {
    #[serde(rename = "type")]
    #[schema(example = "blood")]
    pub kind: Option<String>,
    #[schema(example = "O+")]
    pub blood_type: Option<String>,
    pub organ: Option<String>,
    #[schema(example = "2026-06-01")]
    pub date: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Payload for updating availability; absent fields clear the offer.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityBody {
    pub blood_available: Option<bool>,
    pub organs_available: Option<Vec<String>>,
}

/// Record a donation, growing the derived inventory by one unit.
#[utoipa::path(
    post,
    path = "/donor/donations",
    request_body = CreateDonationBody,
    responses(
        (status = 201, description = "Donation recorded", body = DonationResponse),
        (status = 400, description = "Invalid donation data", body = ApiError),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 403, description = "Donor role required", body = ApiError)
    ),
    tags = ["donor"],
    operation_id = "createDonation"
)]
#[post("/donor/donations")]
pub async fn create_donation(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<CreateDonationBody>,
) -> ApiResult<HttpResponse> {
    let caller = identity.require_role(Role::Donor)?;
    let body = payload.into_inner();
    let need = parse_need(body.kind, body.blood_type, body.organ)?;
    let date = parse_date(body.date)?;

    let created = state
        .donations
        .record_donation(NewDonation {
            donor_id: caller.id,
            need,
            date,
            address: body.address,
            notes: body.notes,
        })
        .await?;

    Ok(HttpResponse::Created().json(DonationResponse::from(created)))
}

/// The caller's recent donations, newest first.
#[utoipa::path(
    get,
    path = "/donor/donations",
    responses(
        (status = 200, description = "Own donations", body = [DonationResponse]),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 403, description = "Donor role required", body = ApiError)
    ),
    tags = ["donor"],
    operation_id = "listOwnDonations"
)]
#[get("/donor/donations")]
pub async fn list_own_donations(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<Vec<DonationResponse>>> {
    let caller = identity.require_role(Role::Donor)?;
    let donations = state.donations.donations_for(&caller.id).await?;
    Ok(web::Json(
        donations.into_iter().map(DonationResponse::from).collect(),
    ))
}

/// Replace the caller's availability flags.
#[utoipa::path(
    post,
    path = "/donor/availability",
    request_body = AvailabilityBody,
    responses(
        (status = 200, description = "Availability updated", body = AvailabilityResponse),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 403, description = "Donor role required", body = ApiError),
        (status = 404, description = "Unknown donor", body = ApiError)
    ),
    tags = ["donor"],
    operation_id = "setAvailability"
)]
#[post("/donor/availability")]
pub async fn set_availability(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<AvailabilityBody>,
) -> ApiResult<web::Json<AvailabilityResponse>> {
    let caller = identity.require_role(Role::Donor)?;
    let body = payload.into_inner();
    let availability = state
        .donations
        .set_availability(
            &caller.id,
            Availability {
                blood_available: body.blood_available.unwrap_or(false),
                organs_available: body.organs_available.unwrap_or_default(),
            },
        )
        .await?;
    Ok(web::Json(AvailabilityResponse { availability }))
}
