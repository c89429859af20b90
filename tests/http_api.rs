//! HTTP API Tests
//!
//! Drives the full router in-process:
//! - Public rope page and liveness endpoints need no credentials
//! - Admin endpoints require the configured Basic auth pair
//! - Error classes map to 400 / 401 / 404 / 409

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use ropelog::auth::{basic_header, AdminCredentials};
use ropelog::http_server::{build_router, HttpServerConfig, RopeState};
use ropelog::rope::FixedClock;
use ropelog::store::SqliteRopeStore;

// =============================================================================
// Helper Functions
// =============================================================================

const USER: &str = "warden";
const PASS: &str = "correct-horse";

fn app(today: NaiveDate) -> Router {
    let state = RopeState::new(
        SqliteRopeStore::open_in_memory().unwrap(),
        FixedClock(today),
        AdminCredentials::new(USER, PASS),
    );
    build_router(&HttpServerConfig::default(), Arc::new(state))
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

fn admin_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, basic_header(USER, PASS))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn rope_body() -> Value {
    json!({
        "product_name": "Edelrid Boa 9.8",
        "thickness_mm": 9.8,
        "length_m": 60.0,
        "color": "blue",
        "batch": "BOA-77",
        "manufacturing_date": "2022-11-01",
        "purchase_date": "2023-01-01",
        "customer_password": "owner-pin"
    })
}

async fn create_rope(app: &Router) -> String {
    let (status, body) = send(app, admin_post("/admin/ropes", rope_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Public Endpoints
// =============================================================================

#[tokio::test]
async fn test_home_banner() {
    let app = app(today());
    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("Rope Tagging System is Live".to_string()));
}

#[tokio::test]
async fn test_health() {
    let app = app(today());
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_rope_is_404() {
    let app = app(today());
    let (status, body) = send(&app, get("/rope/DOESNOTEXI")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn test_rope_page_shows_status_and_hides_hash() {
    let app = app(today());
    let id = create_rope(&app).await;

    let (status, body) = send(&app, get(&format!("/rope/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["product_name"], "Edelrid Boa 9.8");
    // Purchased 2023-01-01, never inspected, evaluated 2024-06-02
    assert_eq!(body["status"], "INSPECTION DUE");
    assert_eq!(body["next_inspection_due"], "2024-01-01");
    assert!(body.get("customer_password_hash").is_none());
    assert!(!body.to_string().contains("owner-pin"));
}

// =============================================================================
// Admin Gate
// =============================================================================

#[tokio::test]
async fn test_admin_requires_credentials() {
    let app = app(today());

    let response = app.clone().oneshot(get("/admin/ropes")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let challenge = response
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(challenge.starts_with("Basic realm="));

    let wrong = Request::builder()
        .method(Method::POST)
        .uri("/admin/ropes")
        .header(header::AUTHORIZATION, basic_header(USER, "guess"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(rope_body().to_string()))
        .unwrap();
    let (status, _) = send(&app, wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_listing() {
    let app = app(today());
    let id = create_rope(&app).await;

    let request = Request::builder()
        .uri("/admin/ropes")
        .header(header::AUTHORIZATION, basic_header(USER, PASS))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["ropes"][0]["id"], id.as_str());
    assert_eq!(body["ropes"][0]["status"], "INSPECTION DUE");
}

// =============================================================================
// Event Logging
// =============================================================================

#[tokio::test]
async fn test_inspection_then_falls_flow() {
    let app = app(today());
    let id = create_rope(&app).await;

    let (status, _) = send(
        &app,
        admin_post(
            &format!("/admin/ropes/{}/inspections", id),
            json!({"inspection_date": "2024-06-01", "comment": "core intact"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, page) = send(&app, get(&format!("/rope/{}", id))).await;
    assert_eq!(page["status"], "ACTIVE");
    assert_eq!(page["next_inspection_due"], "2025-06-01");

    for day in ["2024-06-01", "2024-06-02"] {
        let (status, body) = send(
            &app,
            admin_post(
                &format!("/admin/ropes/{}/falls", id),
                json!({"fall_date": day, "severity": "minor"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["severity"], "minor");
    }

    let (_, page) = send(&app, get(&format!("/rope/{}", id))).await;
    assert_eq!(page["status"], "DAMAGED");
    assert_eq!(page["falls"].as_array().unwrap().len(), 2);
    assert_eq!(page["inspections"][0]["comment"], "core intact");
}

#[tokio::test]
async fn test_future_date_is_400() {
    let app = app(today());
    let id = create_rope(&app).await;

    let (status, body) = send(
        &app,
        admin_post(
            &format!("/admin/ropes/{}/inspections", id),
            json!({"inspection_date": "2024-06-03"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, _) = send(
        &app,
        admin_post(
            &format!("/admin/ropes/{}/falls", id),
            json!({"fall_date": "2024-06-03", "severity": "major"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_inspection_is_409() {
    let app = app(today());
    let id = create_rope(&app).await;
    let uri = format!("/admin/ropes/{}/inspections", id);

    let (first, _) = send(&app, admin_post(&uri, json!({"inspection_date": "2024-05-01"}))).await;
    assert_eq!(first, StatusCode::CREATED);

    let (second, body) =
        send(&app, admin_post(&uri, json!({"inspection_date": "2024-05-01"}))).await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
}

#[tokio::test]
async fn test_logging_against_unknown_rope_is_404() {
    let app = app(today());
    let (status, _) = send(
        &app,
        admin_post(
            "/admin/ropes/NOSUCHROPE/falls",
            json!({"fall_date": "2024-06-01", "severity": "major"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_registration_is_400() {
    let app = app(today());
    let mut body = rope_body();
    body["thickness_mm"] = json!(-1.0);

    let (status, _) = send(&app, admin_post("/admin/ropes", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
