//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use solar_quote::api::{AppState, router};
use solar_quote::config::CalculatorConfig;

/// Build API state from a config with an extra city and custom terms.
fn build_api_state() -> Arc<AppState> {
    let cfg = CalculatorConfig::from_toml_str(
        r#"
[financing]
terms_months = [12, 36]

[locations.sun_hours]
neom = 7.6
"#,
    )
    .unwrap();
    assert!(cfg.validate().is_empty());
    Arc::new(AppState::from_config(&cfg))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(resp: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn report_endpoint_returns_snapshot() {
    let app = router(build_api_state());
    let resp = app
        .oneshot(post_json(
            "/report",
            r#"{"monthlyBill": 500, "roofArea": 100, "location": "riyadh", "electricityRate": 0.18, "systemType": "hybrid"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    let json = read_json(resp).await;
    assert_eq!(json["formData"]["location"], "riyadh");
    assert_eq!(json["formData"]["systemType"], "hybrid");
    assert_eq!(json["results"]["systemSize"], 13);
    let stamp = json["generatedAt"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
}

#[tokio::test]
async fn configured_city_is_listed_and_used() {
    let state = build_api_state();

    let resp = router(Arc::clone(&state))
        .oneshot(
            Request::builder()
                .uri("/locations")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = read_json(resp).await;
    assert!(
        json.as_array()
            .unwrap()
            .iter()
            .any(|l| l["key"] == "neom" && l["sunHours"] == 7.6)
    );

    let resp = router(state)
        .oneshot(post_json(
            "/estimate",
            r#"{"monthlyBill": 500, "roofArea": 100, "location": "NEOM"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = read_json(resp).await;
    // 92.59 / 7.6 = 12.2 -> 13
    assert_eq!(json["systemSize"], 13);
}

#[tokio::test]
async fn plans_use_configured_terms() {
    let app = router(build_api_state());
    let resp = app
        .oneshot(post_json(
            "/plans",
            r#"{"monthlyBill": 500, "roofArea": 100, "location": "riyadh"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = read_json(resp).await;
    assert_eq!(json["totalCost"], 58500.0);
    let months: Vec<u64> = json["plans"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["months"].as_u64())
        .collect();
    assert_eq!(months, vec![12, 36]);
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let app = router(build_api_state());
    let resp = app
        .oneshot(post_json("/estimate", r#"{"roofArea": 100}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = read_json(resp).await;
    assert!(json["error"].as_str().unwrap().contains("monthlyBill"));
}

#[tokio::test]
async fn wrong_field_type_returns_json_error() {
    let app = router(build_api_state());
    let resp = app
        .oneshot(post_json(
            "/plans",
            r#"{"monthlyBill": "abc", "roofArea": 100, "location": "riyadh"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = read_json(resp).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn negative_rate_returns_400() {
    let app = router(build_api_state());
    let resp = app
        .oneshot(post_json(
            "/report",
            r#"{"monthlyBill": 500, "roofArea": 100, "location": "riyadh", "electricityRate": -0.1}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = read_json(resp).await;
    assert!(json["error"].as_str().unwrap().contains("electricityRate"));
}
