//! Admin request-management endpoints.
//!
//! ```text
//! GET   /admin/requests
//! GET   /admin/requests/{id}/inventory-check
//! PATCH /admin/requests/{id}/status
//! POST  /admin/requests/{id}/notify-unavailable
//! ```

use std::str::FromStr;

use actix_web::{get, patch, post, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::donation::NeedKind;
use crate::domain::ports::InventoryCheck;
use crate::domain::request::{RequestFilter, RequestId, Urgency};
use crate::domain::user::Role;
use crate::domain::Error;
use crate::inbound::http::auth::Identity;
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::schemas::{Ack, RequestResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_status;

/// Listing filters; absent parameters match everything.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListRequestsQuery {
    pub status: Option<String>,
    pub urgency: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Status transition payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatusBody {
    #[schema(example = "APPROVED")]
    pub status: String,
}

fn parse_filter(query: ListRequestsQuery) -> Result<RequestFilter, Error> {
    Ok(RequestFilter {
        status: query.status.as_deref().map(parse_status).transpose()?,
        urgency: query
            .urgency
            .map(|value| {
                Urgency::from_str(&value).map_err(|err| {
                    Error::invalid_request(err.to_string())
                        .with_details(json!({ "field": "urgency", "value": value }))
                })
            })
            .transpose()?,
        kind: query
            .kind
            .map(|value| {
                NeedKind::from_str(&value).map_err(|err| {
                    Error::invalid_request(err.to_string())
                        .with_details(json!({ "field": "type", "value": value }))
                })
            })
            .transpose()?,
    })
}

/// All requests passing the filters, newest first.
#[utoipa::path(
    get,
    path = "/admin/requests",
    params(ListRequestsQuery),
    responses(
        (status = 200, description = "Filtered requests", body = [RequestResponse]),
        (status = 400, description = "Invalid filter value", body = ApiError),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError)
    ),
    tags = ["admin"],
    operation_id = "listRequests"
)]
#[get("/admin/requests")]
pub async fn list_requests(
    state: web::Data<HttpState>,
    identity: Identity,
    query: web::Query<ListRequestsQuery>,
) -> ApiResult<web::Json<Vec<RequestResponse>>> {
    identity.require_role(Role::Admin)?;
    let filter = parse_filter(query.into_inner())?;
    let requests = state.lifecycle.list_requests(filter).await?;
    Ok(web::Json(
        requests.into_iter().map(RequestResponse::from).collect(),
    ))
}

/// Availability and count for the request's need; no side effects.
#[utoipa::path(
    get,
    path = "/admin/requests/{id}/inventory-check",
    params(("id" = Uuid, Path, description = "Request identifier")),
    responses(
        (status = 200, description = "Inventory status for the request", body = InventoryCheck),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError),
        (status = 404, description = "Request not found", body = ApiError)
    ),
    tags = ["admin"],
    operation_id = "inventoryCheck"
)]
#[get("/admin/requests/{id}/inventory-check")]
pub async fn inventory_check(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<InventoryCheck>> {
    identity.require_role(Role::Admin)?;
    let id = RequestId::from(path.into_inner());
    let check = state.lifecycle.inventory_for_request(&id).await?;
    Ok(web::Json(check))
}

/// Move a request to a new status; approving gates on inventory and
/// consumes one matching donation.
#[utoipa::path(
    patch,
    path = "/admin/requests/{id}/status",
    params(("id" = Uuid, Path, description = "Request identifier")),
    request_body = SetStatusBody,
    responses(
        (status = 200, description = "Status updated", body = RequestResponse),
        (status = 400, description = "Invalid status or insufficient inventory", body = ApiError),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError),
        (status = 404, description = "Request not found", body = ApiError)
    ),
    tags = ["admin"],
    operation_id = "setRequestStatus"
)]
#[patch("/admin/requests/{id}/status")]
pub async fn set_request_status(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<Uuid>,
    payload: web::Json<SetStatusBody>,
) -> ApiResult<web::Json<RequestResponse>> {
    identity.require_role(Role::Admin)?;
    let id = RequestId::from(path.into_inner());
    let target = parse_status(&payload.status)?;
    let updated = state.lifecycle.set_status(&id, target).await?;
    Ok(web::Json(RequestResponse::from(updated)))
}

/// Tell the recipient no donors are available; state is untouched.
#[utoipa::path(
    post,
    path = "/admin/requests/{id}/notify-unavailable",
    params(("id" = Uuid, Path, description = "Request identifier")),
    responses(
        (status = 200, description = "Notification emitted", body = Ack),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError),
        (status = 404, description = "Request not found", body = ApiError)
    ),
    tags = ["admin"],
    operation_id = "notifyUnavailable"
)]
#[post("/admin/requests/{id}/notify-unavailable")]
pub async fn notify_unavailable(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Ack>> {
    identity.require_role(Role::Admin)?;
    let id = RequestId::from(path.into_inner());
    state.lifecycle.notify_unavailable(&id).await?;
    Ok(web::Json(Ack { ok: true }))
}
