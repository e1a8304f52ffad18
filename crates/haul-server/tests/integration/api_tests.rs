use axum::body::Body;
use axum::http::{Request, StatusCode};

use haul_core::AppError;
use haul_core::snapshot::PageSnapshot;
use haul_core::testutil::MockRenderer;

use crate::integration::common::{post_json, results_page, send, setup_test_app};

#[tokio::test]
async fn health_returns_200() {
    let app = setup_test_app(MockRenderer::default());

    let (status, json) = send(
        app.router,
        Request::get("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(app.renderer.launch_count(), 0);
}

#[tokio::test]
async fn lookup_returns_ranked_locations() {
    let app = setup_test_app(MockRenderer::with_snapshot(results_page()));

    let (status, json) = send(
        app.router,
        post_json("/mcp", r#"{"itemName":"Quartz","quantity":10}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["item"], "Quartz");
    assert_eq!(json["quantity"], 10.0);
    assert_eq!(json["totalProfit"], 500);

    let locations = json["bestSellLocations"].as_array().unwrap();
    assert_eq!(locations.len(), 2);
    assert_eq!(locations[0]["shop"], "Some Shop");
    assert_eq!(locations[0]["system"], "Stanton");
    assert_eq!(locations[0]["location"], "Area18");
    assert_eq!(locations[0]["price"], 50);
    assert_eq!(
        locations[0]["containerSizes"],
        serde_json::json!([1, 2, 4, 8, 16, 32])
    );
    assert_eq!(locations[1]["containerSizes"], serde_json::json!([8, 16]));
    assert_eq!(
        json["containerSizeOptions"],
        serde_json::json!([1, 2, 4, 8, 16, 32])
    );
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .starts_with("Here are the top 2 places to sell 10 SCU of Quartz:")
    );

    assert_eq!(app.renderer.launch_count(), 1);
    assert_eq!(app.renderer.close_count(), 1);
}

#[tokio::test]
async fn quantity_defaults_to_one() {
    let app = setup_test_app(MockRenderer::with_snapshot(results_page()));

    let (status, json) = send(app.router, post_json("/mcp", r#"{"itemName":"Quartz"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["quantity"], 1.0);
    assert_eq!(json["totalProfit"], 50);
}

#[tokio::test]
async fn missing_item_name_returns_400() {
    let app = setup_test_app(MockRenderer::with_snapshot(results_page()));

    let (status, json) = send(app.router, post_json("/mcp", r#"{"quantity":5}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "missing_item_name");
    assert!(json.get("details").is_none());
    assert_eq!(app.renderer.launch_count(), 0);
}

#[tokio::test]
async fn null_item_name_returns_400() {
    let app = setup_test_app(MockRenderer::with_snapshot(results_page()));

    let (status, json) = send(
        app.router,
        post_json("/mcp", r#"{"itemName":null,"quantity":1}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "missing_item_name");
    assert_eq!(
        json["message"],
        "Please provide the name of the item you want to sell."
    );
    assert_eq!(app.renderer.launch_count(), 0);
}

#[tokio::test]
async fn non_numeric_quantity_returns_400() {
    let app = setup_test_app(MockRenderer::with_snapshot(results_page()));

    let (status, json) = send(
        app.router,
        post_json("/mcp", r#"{"itemName":"Quartz","quantity":"lots"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_quantity");
    assert_eq!(app.renderer.launch_count(), 0);
}

#[tokio::test]
async fn negative_quantity_returns_400() {
    let app = setup_test_app(MockRenderer::with_snapshot(results_page()));

    let (status, json) = send(
        app.router,
        post_json("/mcp", r#"{"itemName":"Quartz","quantity":-3}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_quantity");
}

#[tokio::test]
async fn unknown_item_returns_classified_error() {
    let app = setup_test_app(MockRenderer::with_snapshot(PageSnapshot::text_only(
        "No results found",
    )));

    let (status, json) = send(
        app.router,
        post_json("/mcp", r#"{"itemName":"Unobtainium"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["error"], "item_not_found");
    assert!(json["message"].as_str().unwrap().contains("Unobtainium"));
    assert_eq!(app.renderer.close_count(), 1);
}

#[tokio::test]
async fn navigation_timeout_returns_classified_error() {
    let app = setup_test_app(MockRenderer::with_goto_error(AppError::Timeout(60)));

    let (status, json) = send(
        app.router,
        post_json("/mcp", r#"{"itemName":"Quartz"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["error"], "timeout_error");
    assert_eq!(app.renderer.close_count(), 1);
}

#[tokio::test]
async fn browser_failure_returns_500_with_details() {
    let app = setup_test_app(MockRenderer::with_launch_error(AppError::BrowserError(
        "Failed to launch browser: no chrome".into(),
    )));

    let (status, json) = send(
        app.router,
        post_json("/mcp", r#"{"itemName":"Quartz"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "unknown_error");
    assert!(json["details"].as_str().unwrap().contains("no chrome"));
    assert_eq!(app.renderer.close_count(), 0);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = setup_test_app(MockRenderer::with_snapshot(results_page()));

    let (status, _) = send(app.router, post_json("/mcp", "{not json")).await;

    assert!(status.is_client_error());
    assert_eq!(app.renderer.launch_count(), 0);
}
