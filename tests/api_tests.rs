//! Integration tests for the REST API endpoints.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use corpus_buddy::api::{create_router, state::AppState};
use corpus_buddy::cache::SavedCalculationCache;
use corpus_buddy::config::{database::create_tables, presets::CalculatorPresets};

/// Builds a router over a fresh in-memory database.
async fn create_test_app() -> (Router, SavedCalculationCache) {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    create_tables(&db).await.expect("Failed to create tables");

    let cache = SavedCalculationCache::new();
    let state = AppState::new(db, cache.clone(), Arc::new(CalculatorPresets::default()));
    (create_router(state), cache)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn sip_request() -> Value {
    json!({
        "calculatorType": "sip",
        "inputs": {"monthlyInvestment": 10000, "durationYears": 10, "expectedReturn": 12}
    })
}

fn swp_request(monthly_withdrawal: f64) -> Value {
    json!({
        "calculatorType": "swp",
        "inputs": {
            "investment": 1_000_000,
            "monthlyWithdrawal": monthly_withdrawal,
            "durationYears": 10,
            "expectedReturn": 12
        }
    })
}

async fn save(app: &Router, name: &str) -> Value {
    let (_, calculated) = send(app, "POST", "/api/calculate", Some(sip_request())).await;
    let (status, created) = send(
        app,
        "POST",
        "/api/saved-calculations",
        Some(json!({
            "name": name,
            "calculatorType": "sip",
            "inputs": calculated["inputs"],
            "results": calculated["results"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    created
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = create_test_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["savedCalculations"], 0);
}

#[tokio::test]
async fn test_presets() {
    let (app, _) = create_test_app().await;
    let (status, body) = send(&app, "GET", "/api/presets", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sip"]["monthlyInvestment"], 10000.0);
    assert_eq!(body["sip-stepup"]["annualIncrease"], 10.0);
    assert_eq!(body["swp"]["monthlyWithdrawal"], 10000.0);
}

#[tokio::test]
async fn test_calculate_sip() {
    let (app, _) = create_test_app().await;
    let (status, body) = send(&app, "POST", "/api/calculate", Some(sip_request())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["calculatorType"], "sip");
    assert_eq!(body["results"]["investedAmount"], 1_200_000.0);
    assert_eq!(
        body["results"]["totalValue"].as_f64().unwrap().round(),
        2_323_391.0
    );
    assert_eq!(body["results"]["yearlyBreakdown"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_calculate_swp_exhaustion_truncates_breakdown() {
    let (app, _) = create_test_app().await;
    let (status, body) = send(&app, "POST", "/api/calculate", Some(swp_request(20_000.0))).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body["results"]["yearlyBreakdown"].as_array().unwrap();
    assert!(rows.len() < 10);
    assert_eq!(body["results"]["remainingCorpus"], 0.0);
}

#[tokio::test]
async fn test_calculate_accepts_whole_float_duration() {
    let (app, _) = create_test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/calculate",
        Some(json!({
            "calculatorType": "lumpsum",
            "inputs": {"investment": 100000, "durationYears": 10.0, "expectedReturn": 12}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inputs"]["durationYears"], 10);
    assert_eq!(body["results"]["yearlyBreakdown"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_calculate_rejects_out_of_range_input() {
    let (app, _) = create_test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/calculate",
        Some(json!({
            "calculatorType": "sip",
            "inputs": {"monthlyInvestment": 100, "durationYears": 10, "expectedReturn": 12}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("monthlyInvestment"));
}

#[tokio::test]
async fn test_calculate_rejects_malformed_body() {
    let (app, _) = create_test_app().await;
    let (status, body) = send(&app, "POST", "/api/calculate", Some(json!({"inputs": 3}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_compare_scenarios() {
    let (app, _) = create_test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/compare",
        Some(json!({
            "scenarios": [
                {"name": "Steady", "calculatorType": "sip",
                 "inputs": {"monthlyInvestment": 10000, "durationYears": 10, "expectedReturn": 12}},
                {"calculatorType": "sip",
                 "inputs": {"monthlyInvestment": 20000, "durationYears": 10, "expectedReturn": 12}}
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let scenarios = body["scenarios"].as_array().unwrap();
    assert_eq!(scenarios.len(), 2);
    assert_eq!(scenarios[0]["name"], "Steady");
    assert_eq!(scenarios[1]["name"], "Scenario 2");
    assert_eq!(body["leader"], "Scenario 2");
}

#[tokio::test]
async fn test_compare_rejects_more_than_four_scenarios() {
    let (app, _) = create_test_app().await;
    let scenario = json!({
        "calculatorType": "lumpsum",
        "inputs": {"investment": 100000, "durationYears": 10, "expectedReturn": 12}
    });
    let (status, body) = send(
        &app,
        "POST",
        "/api/compare",
        Some(json!({"scenarios": vec![scenario; 5]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("scenarios"));
}

#[tokio::test]
async fn test_saved_calculation_lifecycle() {
    let (app, cache) = create_test_app().await;

    let created = save(&app, "Retirement").await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Retirement");
    assert_eq!(created["calculatorType"], "sip");
    assert!(created["createdAt"].is_string());
    assert_eq!(cache.len().await, 1);

    let (status, fetched) = send(&app, "GET", &format!("/api/saved-calculations/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["inputs"], created["inputs"]);
    assert_eq!(fetched["results"], created["results"]);

    let (status, renamed) = send(
        &app,
        "PATCH",
        &format!("/api/saved-calculations/{id}"),
        Some(json!({"name": "  Early retirement "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Early retirement");
    assert_eq!(renamed["results"], created["results"]);
    assert_eq!(cache.matching("early").await, vec!["Early retirement"]);

    let (status, _) = send(&app, "DELETE", &format!("/api/saved-calculations/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(cache.is_empty().await);

    let (status, body) = send(&app, "GET", &format!("/api/saved-calculations/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Calculation not found"}));
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let (app, _) = create_test_app().await;
    save(&app, "First").await;
    save(&app, "Second").await;

    let (status, body) = send(&app, "GET", "/api/saved-calculations", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Second", "First"]);
}

#[tokio::test]
async fn test_create_rejects_blank_name() {
    let (app, _) = create_test_app().await;
    let (_, calculated) = send(&app, "POST", "/api/calculate", Some(sip_request())).await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/saved-calculations",
        Some(json!({
            "name": "   ",
            "calculatorType": "sip",
            "inputs": calculated["inputs"],
            "results": calculated["results"],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_missing_and_invalid_ids() {
    let (app, _) = create_test_app().await;

    let (status, _) = send(&app, "DELETE", "/api/saved-calculations/999", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/saved-calculations/999",
        Some(json!({"name": "Ghost"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Calculation not found");

    let (status, _) = send(&app, "GET", "/api/saved-calculations/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_saved_calculation() {
    let (app, cache) = create_test_app().await;
    let original = save(&app, "Retirement").await;
    let id = original["id"].as_i64().unwrap();

    let (status, copy) = send(
        &app,
        "POST",
        &format!("/api/saved-calculations/{id}/duplicate"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(copy["name"], "Retirement (Copy)");
    assert_ne!(copy["id"], original["id"]);
    assert_eq!(copy["results"], original["results"]);
    assert_eq!(cache.len().await, 2);

    let (status, body) = send(&app, "POST", "/api/saved-calculations/999/duplicate", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Calculation not found");
}
