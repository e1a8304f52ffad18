use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use haul_core::LookupService;
use haul_core::snapshot::{PageSnapshot, RowSnapshot};
use haul_core::testutil::{MockRenderer, test_config};
use haul_server::routes;
use haul_server::state::AppState;

pub struct TestApp {
    pub router: Router,
    pub renderer: MockRenderer,
}

/// Router backed by `renderer`; the handle is kept for call assertions.
pub fn setup_test_app(renderer: MockRenderer) -> TestApp {
    let service = LookupService::with_config(renderer.clone(), test_config());
    let state = Arc::new(AppState::new(service));
    TestApp {
        router: routes::router(state),
        renderer,
    }
}

/// Results page with one Stanton buyer at 50 UEC and one Pyro buyer at 45 UEC.
pub fn results_page() -> PageSnapshot {
    PageSnapshot::from_rows(vec![
        RowSnapshot::header("Shop Price"),
        RowSnapshot::new("Some Shop Stanton > Area18 ¤50 UEC"),
        RowSnapshot::new("Ruin Station Pyro > Ruin ¤45 UEC").with_sizes(["8", "16"]),
    ])
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response: Response<Body> = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}
