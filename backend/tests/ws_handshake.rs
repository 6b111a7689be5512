//! Handshake behaviour of the notification WebSocket.

#[expect(
    dead_code,
    reason = "Shared harness has helpers used only by other integration suites."
)]
#[path = "support/harness.rs"]
mod harness;

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use harness::{ADMIN_TOKEN, authed, test_api};
use rstest::rstest;

// Example Sec-WebSocket-Key from RFC 6455 section 1.3.
const RFC6455_SAMPLE_KEY: &str = "dGhlIHNhbXBsZSBub25jZQ==";

fn handshake_request() -> TestRequest {
    TestRequest::get()
        .uri("/ws/notifications")
        .insert_header((header::UPGRADE, "websocket"))
        .insert_header((header::CONNECTION, "Upgrade"))
        .insert_header((header::SEC_WEBSOCKET_VERSION, "13"))
        .insert_header((header::SEC_WEBSOCKET_KEY, RFC6455_SAMPLE_KEY))
}

#[rstest]
#[actix_rt::test]
async fn unauthenticated_upgrades_are_rejected() {
    let api = test_api();
    let app = api.init().await;

    let resp = test::call_service(&app, handshake_request().to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_rt::test]
async fn authenticated_upgrades_switch_protocols() {
    let api = test_api();
    let app = api.init().await;

    let req = authed(handshake_request(), ADMIN_TOKEN).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SWITCHING_PROTOCOLS);
}
