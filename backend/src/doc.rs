//! OpenAPI document aggregating the HTTP surface.

use utoipa::OpenApi;

/// Public OpenAPI surface for tooling.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::health::health,
        crate::inbound::http::requests::create_request,
        crate::inbound::http::requests::list_own_requests,
        crate::inbound::http::donors::create_donation,
        crate::inbound::http::donors::list_own_donations,
        crate::inbound::http::donors::set_availability,
        crate::inbound::http::admin::list_requests,
        crate::inbound::http::admin::inventory_check,
        crate::inbound::http::admin::set_request_status,
        crate::inbound::http::admin::notify_unavailable,
    ),
    components(schemas(
        crate::inbound::http::error::ApiError,
        crate::domain::error::ErrorCode,
        crate::inbound::http::schemas::Ack,
        crate::inbound::http::schemas::AvailabilityResponse,
        crate::inbound::http::schemas::DonationResponse,
        crate::inbound::http::schemas::RequestResponse,
        crate::inbound::http::requests::CreateRequestBody,
        crate::inbound::http::donors::CreateDonationBody,
        crate::inbound::http::donors::AvailabilityBody,
        crate::inbound::http::admin::SetStatusBody,
        crate::domain::ports::InventoryCheck,
        crate::domain::donation::NeedKind,
        crate::domain::user::Availability,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "recipient", description = "Recipient request surface"),
        (name = "donor", description = "Donor supply surface"),
        (name = "admin", description = "Request management and inventory gate")
    )
)]
pub struct ApiDoc;
