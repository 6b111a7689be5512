//! Recipient-facing request endpoints.
//!
//! ```text
//! POST /recipient/requests
//! GET  /recipient/requests
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::request::NewRequest;
use crate::domain::user::Role;
use crate::inbound::http::auth::Identity;
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::schemas::RequestResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_need, parse_urgency};

/// Payload for opening a donation request.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    #[serde(rename = "type")]
    #[schema(example = "blood")]
    pub kind: Option<String>,
    #[schema(example = "O+")]
    pub blood_type: Option<String>,
    pub organ: Option<String>,
    pub radius_km: Option<f64>,
    #[schema(example = "high")]
    pub urgency: Option<String>,
    pub description: Option<String>,
    pub hospital_name: Option<String>,
    pub doctor_name: Option<String>,
    pub contact_phone: Option<String>,
}

/// Open a request; it starts `PENDING` and emits `request:new`.
#[utoipa::path(
    post,
    path = "/recipient/requests",
    request_body = CreateRequestBody,
    responses(
        (status = 201, description = "Request opened", body = RequestResponse),
        (status = 400, description = "Invalid request data", body = ApiError),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 403, description = "Recipient role required", body = ApiError)
    ),
    tags = ["recipient"],
    operation_id = "createRequest"
)]
#[post("/recipient/requests")]
pub async fn create_request(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<CreateRequestBody>,
) -> ApiResult<HttpResponse> {
    let caller = identity.require_role(Role::Recipient)?;
    let body = payload.into_inner();
    let need = parse_need(body.kind, body.blood_type, body.organ)?;
    let urgency = parse_urgency(body.urgency)?;

    let created = state
        .lifecycle
        .create_request(NewRequest {
            requester_id: caller.id,
            need,
            radius_km: body.radius_km,
            urgency,
            description: body.description,
            hospital_name: body.hospital_name,
            doctor_name: body.doctor_name,
            contact_phone: body.contact_phone,
        })
        .await?;

    Ok(HttpResponse::Created().json(RequestResponse::from(created)))
}

/// The caller's own requests, newest first.
#[utoipa::path(
    get,
    path = "/recipient/requests",
    responses(
        (status = 200, description = "Own requests", body = [RequestResponse]),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 403, description = "Recipient role required", body = ApiError)
    ),
    tags = ["recipient"],
    operation_id = "listOwnRequests"
)]
#[get("/recipient/requests")]
pub async fn list_own_requests(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<Vec<RequestResponse>>> {
    let caller = identity.require_role(Role::Recipient)?;
    let requests = state.lifecycle.requests_for(&caller.id).await?;
    Ok(web::Json(
        requests.into_iter().map(RequestResponse::from).collect(),
    ))
}
