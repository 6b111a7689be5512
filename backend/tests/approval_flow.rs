//! End-to-end behaviour of the inventory-gated approval workflow.

#[expect(
    dead_code,
    reason = "Shared harness has helpers used only by other integration suites."
)]
#[path = "support/harness.rs"]
mod harness;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use harness::{ADMIN_TOKEN, authed, call_json, donate_blood, open_blood_request, test_api};
use rstest::rstest;
use serde_json::Value;

#[rstest]
#[actix_rt::test]
async fn approving_a_request_consumes_one_matching_donation() {
    let api = test_api();
    let app = api.init().await;

    donate_blood(&app, "O+").await;
    let request_id = open_blood_request(&app, "O+").await;

    let check = authed(
        TestRequest::get().uri(&format!("/admin/requests/{request_id}/inventory-check")),
        ADMIN_TOKEN,
    )
    .to_request();
    let (status, body) = call_json(&app, check).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], true);
    assert_eq!(body["count"], 1);
    assert_eq!(body["type"], "blood");
    assert_eq!(body["item"], "O+");

    let approve = authed(
        TestRequest::patch().uri(&format!("/admin/requests/{request_id}/status")),
        ADMIN_TOKEN,
    )
    .set_json(serde_json::json!({ "status": "APPROVED" }))
    .to_request();
    let (status, body) = call_json(&app, approve).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "APPROVED");

    let recheck = authed(
        TestRequest::get().uri(&format!("/admin/requests/{request_id}/inventory-check")),
        ADMIN_TOKEN,
    )
    .to_request();
    let (status, body) = call_json(&app, recheck).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], false);
    assert_eq!(body["count"], 0);
}

#[rstest]
#[actix_rt::test]
async fn approval_without_stock_fails_and_leaves_the_request_pending() {
    let api = test_api();
    let app = api.init().await;

    let request_id = open_blood_request(&app, "B-").await;

    let approve = authed(
        TestRequest::patch().uri(&format!("/admin/requests/{request_id}/status")),
        ADMIN_TOKEN,
    )
    .set_json(serde_json::json!({ "status": "APPROVED" }))
    .to_request();
    let (status, body) = call_json(&app, approve).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "insufficient_inventory");
    assert_eq!(body["message"], "B- blood is currently out of stock");
    assert_eq!(body["details"]["item"], "B-");

    let list = authed(
        TestRequest::get().uri("/admin/requests?status=PENDING"),
        ADMIN_TOKEN,
    )
    .to_request();
    let (status, body) = call_json(&app, list).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("request list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"].as_str(), Some(request_id.as_str()));
}

#[rstest]
#[actix_rt::test]
async fn a_single_unit_only_covers_one_approval() {
    let api = test_api();
    let app = api.init().await;

    donate_blood(&app, "AB+").await;
    let first = open_blood_request(&app, "AB+").await;
    let second = open_blood_request(&app, "AB+").await;

    let approve_first = authed(
        TestRequest::patch().uri(&format!("/admin/requests/{first}/status")),
        ADMIN_TOKEN,
    )
    .set_json(serde_json::json!({ "status": "APPROVED" }))
    .to_request();
    let (status, _) = call_json(&app, approve_first).await;
    assert_eq!(status, StatusCode::OK);

    let approve_second = authed(
        TestRequest::patch().uri(&format!("/admin/requests/{second}/status")),
        ADMIN_TOKEN,
    )
    .set_json(serde_json::json!({ "status": "APPROVED" }))
    .to_request();
    let (status, body) = call_json(&app, approve_second).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "insufficient_inventory");
}

#[rstest]
#[actix_rt::test]
async fn lifecycle_events_arrive_in_order_with_recipient_messages() {
    let api = test_api();
    let app = api.init().await;
    let mut events = api.state.notifications.subscribe();

    donate_blood(&app, "O-").await;
    let request_id = open_blood_request(&app, "O-").await;

    let approve = authed(
        TestRequest::patch().uri(&format!("/admin/requests/{request_id}/status")),
        ADMIN_TOKEN,
    )
    .set_json(serde_json::json!({ "status": "APPROVED" }))
    .to_request();
    let (status, _) = call_json(&app, approve).await;
    assert_eq!(status, StatusCode::OK);

    let opened: Value =
        serde_json::from_str(&events.recv().await.expect("new event")).expect("json frame");
    assert_eq!(opened["event"], "request:new");
    assert_eq!(opened["payload"]["id"].as_str(), Some(request_id.as_str()));

    let status_changed: Value =
        serde_json::from_str(&events.recv().await.expect("status event")).expect("json frame");
    assert_eq!(status_changed["event"], "request:status");
    assert_eq!(status_changed["payload"]["status"], "APPROVED");
    assert_eq!(
        status_changed["payload"]["message"],
        "Your blood request has been approved"
    );

    let approved: Value =
        serde_json::from_str(&events.recv().await.expect("approved event")).expect("json frame");
    assert_eq!(approved["event"], "request:approved");
    assert_eq!(
        approved["payload"]["requestId"].as_str(),
        Some(request_id.as_str())
    );
    assert_eq!(approved["payload"]["bloodType"], "O-");
}
