//! HTTP surface tests, driven through the router with `tower::ServiceExt`.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bess_quote_builder::{api, config::Config, repo::Repositories};

fn app() -> Router {
    let cfg = Config::default();
    let state = api::AppState::from_config(&cfg, Repositories::in_memory()).unwrap();
    api::router(state, &cfg).unwrap()
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

#[tokio::test]
async fn healthz_reports_memory_source_healthy() {
    let (status, body) = send(app(), "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["constants_source"]["status"], "healthy");
}

#[tokio::test]
async fn power_estimate_for_office() {
    let (status, body) = send(
        app(),
        "POST",
        "/api/v1/power",
        Some(json!({"slug": "office", "facility": {"squareFeet": 50000}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["powerMW"], 0.3);
    assert_eq!(body["data"]["durationHrs"], 4.0);
}

#[tokio::test]
async fn power_estimate_rejects_empty_slug() {
    let (status, body) = send(app(), "POST", "/api/v1/power", Some(json!({"slug": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
}

#[tokio::test]
async fn quote_returns_envelope_and_validation() {
    let (status, body) = send(
        app(),
        "POST",
        "/api/v1/quotes",
        Some(json!({
            "slug": "hotel",
            "facility": {"roomCount": "150"},
            "storageSizeMW": 1.0,
            "durationHours": 4.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert!(data["quoteId"].is_string());
    assert!(data["envelope"]["totalSellDisplay"].as_str().unwrap().starts_with('$'));
    assert!(data["envelope"]["blendedMarginDisplay"].as_str().unwrap().ends_with('%'));
    assert!(data["validation"]["score"].as_u64().unwrap() <= 100);
    assert_eq!(data["quote"]["energyKwh"], 4000.0);
    assert!(body["metadata"]["durationMs"].is_u64());
}

#[tokio::test]
async fn quote_rejects_out_of_range_duration() {
    let (status, _) = send(
        app(),
        "POST",
        "/api/v1/quotes",
        Some(json!({"slug": "office", "durationHours": 72})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn constants_update_round_trips_through_cache() {
    let app = app();

    let (status, body) = send(app.clone(), "GET", "/api/v1/constants/battery_cost_per_kwh", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["value"], 350.0);

    let (status, _) = send(
        app.clone(),
        "PUT",
        "/api/v1/constants/battery_cost_per_kwh",
        Some(json!({"value": 320.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(app.clone(), "GET", "/api/v1/constants/battery_cost_per_kwh", None).await;
    assert_eq!(body["data"]["value"], 320.0);

    let (_, body) = send(app, "GET", "/api/v1/constants?category=equipment", None).await;
    assert_eq!(body["data"]["battery_cost_per_kwh"], 320.0);
}

#[tokio::test]
async fn unknown_constant_is_not_found() {
    let (status, body) = send(app(), "GET", "/api/v1/constants/not_a_constant", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFound");
}

#[tokio::test]
async fn malformed_constant_key_is_rejected() {
    let (status, body) = send(
        app(),
        "PUT",
        "/api/v1/constants/Battery-Cost",
        Some(json!({"value": 300.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");

    let (status, _) = send(app(), "GET", "/api/v1/constants/Battery-Cost", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cache_clear_marks_cache_stale() {
    let app = app();
    send(app.clone(), "GET", "/api/v1/constants", None).await;

    let (_, body) = send(app.clone(), "GET", "/api/v1/constants/cache", None).await;
    assert_eq!(body["data"]["fresh"], true);

    let (status, body) = send(app, "POST", "/api/v1/constants/cache/clear", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fresh"], false);
    assert_eq!(body["data"]["entries"], 0);
}

#[tokio::test]
async fn facility_types_are_listed() {
    let (status, body) = send(app(), "GET", "/api/v1/facility-types", None).await;
    assert_eq!(status, StatusCode::OK);
    let slugs: Vec<&str> = body["data"].as_array().unwrap().iter().filter_map(Value::as_str).collect();
    assert!(slugs.contains(&"office"));
    assert!(slugs.contains(&"data-center"));
    assert_eq!(body["metadata"]["totalCount"], slugs.len());
}
