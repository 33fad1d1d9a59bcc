//! API integration tests, driving the router in-process

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use party_printout::api::handlers::{EXPORT_FILE_NAME, XLSX_CONTENT_TYPE};
use party_printout::api::{build_router, ApiConfig, AppState};
use party_printout::excel::DAY_PRINTOUT_SHEET;
use party_printout::session::CommitOutcome;
use rust_xlsxwriter::Workbook;
use serde_json::Value;
use tower::ServiceExt;

fn app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new());
    let router = build_router(Arc::clone(&state), &ApiConfig::default());
    (router, state)
}

fn day_workbook(name: &str) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name(DAY_PRINTOUT_SHEET).unwrap();
    ws.write_string(0, 1, "Jan").unwrap();
    ws.write_number(0, 2, 1).unwrap();
    ws.write_number(0, 3, 2024).unwrap();
    ws.write_string(1, 6, "Name").unwrap();
    ws.write_number(2, 4, 0.5).unwrap();
    ws.write_string(2, 6, name).unwrap();
    ws.write_number(2, 11, 3).unwrap();
    workbook.save_to_buffer().unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn upload_request(bytes: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/upload")
        .body(Body::from(bytes))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// INFO ENDPOINTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_health() {
    let (router, _) = app();
    let (status, json) = send(&router, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_version_names_sheet() {
    let (router, _) = app();
    let (_, json) = send(&router, get("/version")).await;
    assert_eq!(json["data"]["sheet"], "Day Printout");
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let (router, _) = app();
    let (_, json) = send(&router, get("/")).await;
    let endpoints = json["data"]["endpoints"].as_array().unwrap();
    assert!(endpoints.iter().any(|e| e["path"] == "/api/v1/upload"));
}

// ═══════════════════════════════════════════════════════════════════════════
// UPLOAD / PRINTOUT / RESET
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_printout_starts_idle() {
    let (router, _) = app();
    let (status, json) = send(&router, get("/api/v1/printout")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["state"], "idle");
    assert!(json["data"].get("printout").is_none());
}

#[tokio::test]
async fn test_upload_renders_printout() {
    let (router, _) = app();
    let (status, json) = send(&router, upload_request(day_workbook("Ava"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["date_label"], "Jan 1 2024");
    let party = &json["data"]["parties"][0];
    assert_eq!(party["name"], "Ava");
    assert_eq!(party["prep_time"], "11:40");
    assert_eq!(party["eat_time"], "12:00");
    assert_eq!(party["kids_food"], "Hot Chips: 3");
    assert_eq!(party["adult_food"], "(none)");

    let (_, json) = send(&router, get("/api/v1/printout")).await;
    assert_eq!(json["data"]["state"], "loaded");
    assert_eq!(json["data"]["printout"]["parties"][0]["name"], "Ava");
}

#[tokio::test]
async fn test_upload_corrupt_keeps_previous_printout() {
    let (router, _) = app();
    send(&router, upload_request(day_workbook("Ava"))).await;

    let (status, json) = send(&router, upload_request(b"garbage".to_vec())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["success"], false);
    assert_eq!(json["error_kind"], "decode");

    let (_, json) = send(&router, get("/api/v1/printout")).await;
    assert_eq!(json["data"]["state"], "loaded");
    assert_eq!(json["data"]["printout"]["parties"][0]["name"], "Ava");
}

#[tokio::test]
async fn test_upload_missing_sheet_from_idle() {
    let (router, _) = app();
    let mut workbook = Workbook::new();
    workbook.add_worksheet().write_string(0, 0, "x").unwrap();

    let (status, json) =
        send(&router, upload_request(workbook.save_to_buffer().unwrap())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error_kind"], "missing_sheet");

    let (_, json) = send(&router, get("/api/v1/printout")).await;
    assert_eq!(json["data"]["state"], "failed");
    assert_eq!(json["data"]["failure"]["kind"], "missing_sheet");
}

#[tokio::test]
async fn test_reset_clears_printout() {
    let (router, _) = app();
    send(&router, upload_request(day_workbook("Ava"))).await;

    let reset = Request::builder()
        .method("POST")
        .uri("/api/v1/reset")
        .body(Body::empty())
        .unwrap();
    let (_, json) = send(&router, reset).await;
    assert_eq!(json["data"]["state"], "idle");

    let (_, json) = send(&router, get("/api/v1/printout")).await;
    assert_eq!(json["data"]["state"], "idle");
}

#[tokio::test]
async fn test_upload_superseded_by_later_upload() {
    let (router, state) = app();

    // Another upload starts after this one and wins
    let stale = state.session.lock().await.begin_upload();
    let (status, _) = send(&router, upload_request(day_workbook("Leo"))).await;
    assert_eq!(status, StatusCode::OK);

    let outcome = state
        .session
        .lock()
        .await
        .commit(stale, Err(party_printout::DecodeFailure::Decode("late".to_string())));
    assert_eq!(outcome, CommitOutcome::Superseded);

    let (_, json) = send(&router, get("/api/v1/printout")).await;
    assert_eq!(json["data"]["printout"]["parties"][0]["name"], "Leo");
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_export_without_printout_conflicts() {
    let (router, _) = app();
    let (status, json) = send(&router, get("/api/v1/export")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_export_downloads_xlsx() {
    let (router, _) = app();
    send(&router, upload_request(day_workbook("Ava"))).await;

    let response = router.clone().oneshot(get("/api/v1/export")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        XLSX_CONTENT_TYPE
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains(EXPORT_FILE_NAME));

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    // xlsx is a zip container
    assert_eq!(&body[..2], b"PK");
}
