//! Liveness endpoint.

use actix_web::{get, web};

use crate::inbound::http::schemas::Ack;

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = Ack)),
    tags = ["health"],
    operation_id = "health"
)]
#[get("/health")]
pub async fn health() -> web::Json<Ack> {
    web::Json(Ack { ok: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use rstest::rstest;

    #[rstest]
    #[actix_rt::test]
    async fn health_answers_ok() {
        let app = test::init_service(App::new().service(health)).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/health").to_request(),
        )
        .await;
        assert!(res.status().is_success());
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["ok"], true);
    }
}
