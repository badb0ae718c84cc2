use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use launch_core::{LaunchRecord, Outcome, RecordStore};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let store = RecordStore::from_records(vec![
        LaunchRecord::new("SiteA", 500.0, Outcome::Success, "v1.0"),
        LaunchRecord::new("SiteA", 2000.0, Outcome::Failure, "v1.0"),
        LaunchRecord::new("SiteB", 1500.0, Outcome::Success, "v1.1"),
        LaunchRecord::new("SiteB", 3000.0, Outcome::Success, "v1.1"),
    ])
    .unwrap();
    launch_web::router(Arc::new(store))
}

async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn post_update(body: Value) -> (StatusCode, Value) {
    let request = Request::post("/_dash-update-component")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn chart_ids(reply: &Value) -> Vec<&str> {
    reply["charts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_index_serves_page() {
    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("success-pie-chart"));
    assert!(html.contains("success-payload-scatter-chart"));
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_layout_lists_sites_from_data() {
    let (status, body) = get("/_dash-layout").await;
    assert_eq!(status, StatusCode::OK);
    let layout: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(layout["title"], "SpaceX Launch Records Dashboard");
    assert_eq!(
        layout["site_dropdown"]["options"],
        json!([
            { "label": "All Sites", "value": "ALL" },
            { "label": "SiteA", "value": "SiteA" },
            { "label": "SiteB", "value": "SiteB" },
        ])
    );
    assert_eq!(layout["payload_slider"]["value"], json!([500.0, 3000.0]));
    assert_eq!(layout["payload_slider"]["max"], json!(10000.0));
}

#[tokio::test]
async fn test_initial_update_renders_both_charts() {
    let (status, reply) = post_update(json!({
        "state": { "site": "ALL", "payload": [500.0, 3000.0] }
    }))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        chart_ids(&reply),
        vec!["success-pie-chart", "success-payload-scatter-chart"]
    );
    assert_eq!(reply["charts"][0]["figure"]["data"][0]["values"], json!([2, 2]));
}

#[tokio::test]
async fn test_slider_change_only_updates_scatter() {
    let (status, reply) = post_update(json!({
        "changed": "payload-slider",
        "state": { "site": "ALL", "payload": [1000.0, 3000.0] }
    }))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chart_ids(&reply), vec!["success-payload-scatter-chart"]);
    let traces = reply["charts"][0]["figure"]["data"].as_array().unwrap();
    let points: usize = traces.iter().map(|t| t["x"].as_array().unwrap().len()).sum();
    assert_eq!(points, 3);
}

#[tokio::test]
async fn test_unknown_site_yields_empty_charts() {
    let (status, reply) = post_update(json!({
        "changed": "site-dropdown",
        "state": { "site": "Unknown Site", "payload": [0.0, 10000.0] }
    }))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["charts"][0]["figure"]["data"], json!([]));
    assert_eq!(reply["charts"][1]["figure"]["data"], json!([]));
}

#[tokio::test]
async fn test_inverted_range_is_bad_request() {
    let (status, reply) = post_update(json!({
        "changed": "payload-slider",
        "state": { "site": "ALL", "payload": [5000.0, 100.0] }
    }))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(reply["error"].as_str().unwrap().contains("low bound exceeds high bound"));
}

#[tokio::test]
async fn test_out_of_domain_range_is_clamped() {
    let (status, reply) = post_update(json!({
        "changed": "payload-slider",
        "state": { "site": "ALL", "payload": [-50.0, 99999.0] }
    }))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["state"]["payload"], json!([0.0, 10000.0]));
}
