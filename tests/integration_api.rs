//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use storm_telecom_sim::api::{AppState, router};

fn build_api_state() -> Arc<AppState> {
    Arc::new(AppState::new(common::buffalo_clock()))
}

async fn send(state: &Arc<AppState>, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = router(Arc::clone(state)).oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn get_status() -> Request<Body> {
    Request::builder()
        .uri("/status")
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn status_advances_the_shared_clock() {
    let state = build_api_state();

    let (_, first) = send(&state, get_status()).await;
    let (status, second) = send(&state, get_status()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["tick"], 1);
    assert_eq!(second["tick"], 2);

    let zone = &second["zones"][0];
    for key in [
        "zone",
        "displayName",
        "status",
        "latency",
        "download",
        "packetLoss",
        "infrastructureHealth",
        "powerAvailability",
        "predictedOutageRisk",
        "estimatedRepairTime",
    ] {
        assert!(zone.get(key).is_some(), "missing key: {key}");
    }
    assert!(second["storm"].get("category").is_some());
    assert!(second["network"].get("emergencyCalls").is_some());
}

#[tokio::test]
async fn ingest_then_status_reflects_population() {
    let state = build_api_state();

    let (status, body) = send(
        &state,
        post_json(
            "/ingest",
            serde_json::json!([{"zone": "B", "population": 99999}, {"zone": "Z"}]),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Metrics ingested");
    assert_eq!(body["ignored"], serde_json::json!(["Z"]));

    let (_, snapshot) = send(&state, get_status()).await;
    assert_eq!(snapshot["zones"][1]["population"], 99999);
}

#[tokio::test]
async fn rejected_ingest_changes_nothing() {
    let state = build_api_state();
    let before = state.clock.lock().unwrap().state().clone();

    let (status, body) = send(
        &state,
        post_json(
            "/ingest",
            serde_json::json!([{"zone": "A", "population": 1}, {"zone": "C", "floodRisk": 3.0}]),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("error").is_some());
    assert_eq!(state.clock.lock().unwrap().state(), &before);
}

#[tokio::test]
async fn storm_override_resets_clock_state() {
    let state = build_api_state();
    send(&state, get_status()).await;

    let (status, body) = send(&state, post_json("/storm", serde_json::json!({"intensity": 0.3}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Storm intensity set to 30%");
    assert_eq!(body["windSpeed"], 75);
    assert_eq!(body["category"], "Category 1 Hurricane");

    let clock = state.clock.lock().unwrap();
    assert_eq!(clock.state().storm.time(), 0);
    assert_eq!(clock.network_overview().emergency_calls, 0);
}

#[tokio::test]
async fn storm_override_rejects_out_of_range() {
    let state = build_api_state();
    let before = state.clock.lock().unwrap().state().clone();

    for body in [
        serde_json::json!({"intensity": 2}),
        serde_json::json!({"intensity": null}),
        serde_json::json!({"level": 0.5}),
    ] {
        let (status, json) = send(&state, post_json("/storm", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Intensity must be a number between 0 and 1");
    }
    assert_eq!(state.clock.lock().unwrap().state(), &before);
}
