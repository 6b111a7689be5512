//! Shared harness for the HTTP endpoint suites: an app over fresh in-memory
//! stores with one bearer token provisioned per role.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use chrono::Utc;
use serde_json::Value;

use lifelink_backend::domain::user::{Availability, Role, User, UserId};
use lifelink_backend::inbound::http::state::HttpState;
use lifelink_backend::outbound::auth::StaticTokenAuthenticator;
use lifelink_backend::server::{self, Stores};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const DONOR_TOKEN: &str = "donor-token";
pub const RECIPIENT_TOKEN: &str = "recipient-token";

pub struct TestApi {
    pub state: web::Data<HttpState>,
    pub stores: Stores,
    pub admin_id: UserId,
    pub donor_id: UserId,
    pub recipient_id: UserId,
}

pub fn test_api() -> TestApi {
    let mut auth = StaticTokenAuthenticator::new();
    let admin_id = auth.add_token(ADMIN_TOKEN, Role::Admin);
    let donor_id = auth.add_token(DONOR_TOKEN, Role::Donor);
    let recipient_id = auth.add_token(RECIPIENT_TOKEN, Role::Recipient);
    let (state, stores) = server::in_memory_state(Arc::new(auth));
    TestApi {
        state: web::Data::new(state),
        stores,
        admin_id,
        donor_id,
        recipient_id,
    }
}

impl TestApi {
    pub async fn init(
        &self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
    {
        test::init_service(App::new().configure(server::app_config(self.state.clone()))).await
    }

    /// Persist a user record for the donor token so profile-backed endpoints
    /// such as availability can resolve it.
    pub fn seed_donor_profile(&self) {
        self.stores.users.seed(User {
            id: self.donor_id,
            email: "donor@example.com".to_owned(),
            name: "Test Donor".to_owned(),
            role: Role::Donor,
            blood_type: Some("O+".to_owned()),
            organ_pledge: Vec::new(),
            availability: Availability::default(),
            created_at: Utc::now(),
        });
    }
}

pub fn authed(req: TestRequest, token: &str) -> TestRequest {
    req.insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
}

/// Issue `req` against `app` and return the status alongside the JSON body.
pub async fn call_json<S>(app: &S, req: Request) -> (actix_web::http::StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// Record a blood donation through the donor endpoint.
pub async fn donate_blood<S>(app: &S, blood_type: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let req = authed(TestRequest::post().uri("/donor/donations"), DONOR_TOKEN)
        .set_json(serde_json::json!({
            "type": "blood",
            "bloodType": blood_type,
            "date": "2026-06-01",
        }))
        .to_request();
    let (status, body) = call_json(app, req).await;
    assert_eq!(status, actix_web::http::StatusCode::CREATED, "{body}");
    body
}

/// Open a blood request through the recipient endpoint and return its id.
pub async fn open_blood_request<S>(app: &S, blood_type: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let req = authed(
        TestRequest::post().uri("/recipient/requests"),
        RECIPIENT_TOKEN,
    )
    .set_json(serde_json::json!({
        "type": "blood",
        "bloodType": blood_type,
        "urgency": "high",
    }))
    .to_request();
    let (status, body) = call_json(app, req).await;
    assert_eq!(status, actix_web::http::StatusCode::CREATED, "{body}");
    body["id"].as_str().expect("request id").to_owned()
}
