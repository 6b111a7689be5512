//! WebSocket notification fan-out.
//!
//! Authenticated clients connect to `/ws/notifications` and receive every
//! event envelope the lifecycle manager emits from then on. Delivery is
//! best-effort: slow consumers that lag past the hub capacity simply lose
//! the oldest frames.

use std::time::{Duration, Instant};

use actix_web::{HttpRequest, HttpResponse, get, rt, web};
use actix_ws::{CloseCode, CloseReason, Message};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::interval;
use tracing::{debug, info};

use crate::inbound::http::auth::authenticate_request;
use crate::inbound::http::state::HttpState;

/// Time between heartbeats to the client.
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
/// Maximum silence from the client before the connection is dropped.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upgrade to a WebSocket and stream notification envelopes.
#[get("/ws/notifications")]
pub async fn notifications(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<HttpState>,
) -> actix_web::Result<HttpResponse> {
    let Some(caller) = authenticate_request(state.auth.as_ref(), &req) else {
        return Ok(HttpResponse::Unauthorized().finish());
    };

    let (response, mut session, mut msg_stream) = actix_ws::handle(&req, stream)?;
    let mut events = state.notifications.subscribe();
    debug!(caller = %caller.id, "notification socket opened");

    rt::spawn(async move {
        let mut heartbeat = interval(HEARTBEAT_INTERVAL);
        let mut last_seen = Instant::now();

        loop {
            tokio::select! {
                frame = events.recv() => match frame {
                    Ok(text) => {
                        if session.text(text).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "slow notification consumer lagged");
                    }
                    Err(RecvError::Closed) => break,
                },
                message = msg_stream.recv() => match message {
                    Some(Ok(Message::Ping(payload))) => {
                        last_seen = Instant::now();
                        if session.pong(&payload).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Pong(_) | Message::Text(_) | Message::Binary(_))) => {
                        last_seen = Instant::now();
                    }
                    Some(Ok(Message::Close(reason))) => {
                        let _ = session.close(reason).await;
                        return;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                },
                _ = heartbeat.tick() => {
                    if last_seen.elapsed() > CLIENT_TIMEOUT {
                        info!("notification socket heartbeat timeout");
                        let _ = session
                            .close(Some(CloseReason {
                                code: CloseCode::Normal,
                                description: Some("heartbeat timeout".into()),
                            }))
                            .await;
                        return;
                    }
                    if session.ping(b"").await.is_err() {
                        break;
                    }
                }
            }
        }
        let _ = session.close(None).await;
    });

    Ok(response)
}
